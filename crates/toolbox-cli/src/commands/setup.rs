//! Setup command implementation.
//!
//! Installs the MCP toolbox into `~/.config/opencode/`: creates the
//! directories, copies the proxy binary and `.env` template, and renders
//! `opencode.json` from the template in the source checkout. Existing files
//! are only replaced after confirmation (or with `--force`); an existing
//! `tools/.env` is never touched.

use crate::cli::SetupArgs;
use crate::config::opencode_dir;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::prompt::{AssumeYes, Confirm, TerminalPrompt};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the proxy binary copied into `tools/`
pub const PROXY_BINARY: &str = "toolbox-mcp";

/// Template path relative to the source directory
pub const TEMPLATE_PATH: &str = "config/opencode.json.template";

/// Credentials template shipped in the source directory
pub const ENV_EXAMPLE: &str = ".env.example";

/// Marker of the package file OpenCode Desktop manages itself
const DESKTOP_PACKAGE_MARKER: &str = "@opencode-ai";

/// Target locations under the OpenCode config directory.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    /// `~/.config/opencode`
    pub config_dir: PathBuf,
    /// `~/.config/opencode/tools`
    pub tools_dir: PathBuf,
    /// `~/.config/opencode/tools/.env`
    pub env_target: PathBuf,
    /// `~/.config/opencode/opencode.json`
    pub config_target: PathBuf,
}

impl InstallPaths {
    /// Lay out the install targets under `config_dir`.
    pub fn under(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let tools_dir = config_dir.join("tools");
        Self {
            env_target: tools_dir.join(".env"),
            config_target: config_dir.join("opencode.json"),
            tools_dir,
            config_dir,
        }
    }
}

/// Inputs to an install run.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Checkout holding `.env.example` and the config template
    pub source_dir: PathBuf,
    /// Directory holding the built `toolbox-mcp` binary
    pub binary_dir: Option<PathBuf>,
    /// LM Studio endpoint substituted into the template
    pub lm_studio_url: String,
}

/// How an install run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Everything written
    Complete,
    /// `opencode.json` existed and the user kept it
    ConfigKept,
}

/// LM Studio endpoint used when none is given
pub fn default_lm_studio_url() -> &'static str {
    if cfg!(windows) {
        "http://localhost:1234/v1"
    } else {
        "http://192.168.1.38:1234/v1"
    }
}

/// Path rendered with forward slashes, as JSON config expects
pub fn to_forward_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Substitute `{{CONFIG_DIR}}` and `{{LM_STUDIO_URL}}` in the template
pub fn render_template(template: &str, config_dir: &Path, lm_studio_url: &str) -> String {
    template
        .replace("{{CONFIG_DIR}}", &to_forward_slash(config_dir))
        .replace("{{LM_STUDIO_URL}}", lm_studio_url)
}

/// Execute the setup command.
pub fn execute_setup(args: SetupArgs, formatter: &Formatter) -> Result<()> {
    let paths = InstallPaths::under(opencode_dir()?);
    let options = SetupOptions {
        source_dir: args.source,
        binary_dir: std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        lm_studio_url: args
            .lm_studio_url
            .unwrap_or_else(|| default_lm_studio_url().to_string()),
    };

    println!("\n=== OpenCode Toolbox Setup ===\n");
    println!("  Source:  {}", options.source_dir.display());
    println!("  Target:  {}", paths.config_dir.display());
    println!("  OS:      {}", std::env::consts::OS);

    let mut prompt: Box<dyn Confirm> = if args.force {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt::new()?)
    };

    match run_setup(&paths, &options, prompt.as_mut(), formatter)? {
        SetupOutcome::ConfigKept => {
            println!("{}", formatter.step("Done", "Setup complete (config not updated)."));
        }
        SetupOutcome::Complete => {
            println!("{}", formatter.step("Done", "Setup complete!\n"));
            println!("  Next steps:");
            println!("  1. Edit {} with your API keys", paths.env_target.display());
            println!("  2. Restart OpenCode Desktop to pick up the new config");
            println!("  3. Run /connect in OpenCode to authenticate providers (if needed)");
            println!("  4. You can now delete the source folder - everything is installed.\n");
        }
    }

    Ok(())
}

/// Run every install step against `paths`.
pub fn run_setup(
    paths: &InstallPaths,
    options: &SetupOptions,
    prompt: &mut dyn Confirm,
    formatter: &Formatter,
) -> Result<SetupOutcome> {
    println!("{}", formatter.step("1", "Creating directories..."));
    create_dirs(paths, formatter)?;

    println!("{}", formatter.step("2", "Copying MCP tool files..."));
    copy_tool_files(paths, options, prompt, formatter)?;

    println!("{}", formatter.step("3", "Setting up .env..."));
    setup_env(paths, options, formatter)?;

    println!("{}", formatter.step("4", "Generating opencode.json..."));
    write_config(paths, options, prompt, formatter)
}

fn create_dirs(paths: &InstallPaths, formatter: &Formatter) -> Result<()> {
    if !paths.config_dir.exists() {
        fs::create_dir_all(&paths.config_dir)?;
        println!("  {}", formatter.success(&format!("Created {}", paths.config_dir.display())));
    }

    if !paths.tools_dir.exists() {
        fs::create_dir_all(&paths.tools_dir)?;
        println!("  {}", formatter.success(&format!("Created {}", paths.tools_dir.display())));
    } else {
        println!("  {}", formatter.info(&format!("{} already exists", paths.tools_dir.display())));
    }
    Ok(())
}

/// Source path and installed file name of everything copied into `tools/`
fn tool_files(options: &SetupOptions) -> Vec<(PathBuf, String)> {
    let binary = format!("{}{}", PROXY_BINARY, std::env::consts::EXE_SUFFIX);
    let mut files = Vec::new();
    if let Some(dir) = &options.binary_dir {
        files.push((dir.join(&binary), binary));
    }
    files.push((options.source_dir.join(ENV_EXAMPLE), ENV_EXAMPLE.to_string()));
    files
}

fn copy_tool_files(
    paths: &InstallPaths,
    options: &SetupOptions,
    prompt: &mut dyn Confirm,
    formatter: &Formatter,
) -> Result<()> {
    for (src, name) in tool_files(options) {
        let dst = paths.tools_dir.join(&name);

        if !src.is_file() {
            println!("  {}", formatter.warning(&format!("SKIP {} (not found at {})", name, src.display())));
            continue;
        }

        if dst.exists()
            && !prompt.confirm(&format!("  {} already exists in target. Overwrite? [y/N] ", name))?
        {
            println!("  {}", formatter.info(&format!("SKIP {}", name)));
            continue;
        }

        fs::copy(&src, &dst)?;
        println!("  {}", formatter.success(&format!("Copied {}", name)));
    }
    Ok(())
}

fn setup_env(paths: &InstallPaths, options: &SetupOptions, formatter: &Formatter) -> Result<()> {
    if paths.env_target.exists() {
        println!(
            "  {}",
            formatter.info(&format!(".env already exists at {} (keeping existing)", paths.env_target.display()))
        );
        return Ok(());
    }

    let example = options.source_dir.join(ENV_EXAMPLE);
    if example.is_file() {
        fs::copy(&example, &paths.env_target)?;
        println!(
            "  {}",
            formatter.success(&format!("Created .env from template at {}", paths.env_target.display()))
        );
        println!("  Edit this file to add your API keys (Slack, Notion, n8n)");
    } else {
        println!(
            "  {}",
            formatter.warning(".env.example not found in source, skipping .env creation")
        );
    }
    Ok(())
}

fn write_config(
    paths: &InstallPaths,
    options: &SetupOptions,
    prompt: &mut dyn Confirm,
    formatter: &Formatter,
) -> Result<SetupOutcome> {
    let template_path = options.source_dir.join(TEMPLATE_PATH);
    if !template_path.is_file() {
        return Err(CliError::Setup(format!("{} not found!", TEMPLATE_PATH)));
    }

    let template = fs::read_to_string(&template_path)?;
    let config = render_template(&template, &paths.config_dir, &options.lm_studio_url);

    if paths.config_target.exists() {
        println!(
            "  {}",
            formatter.info(&format!("opencode.json already exists at {}", paths.config_target.display()))
        );
        if !prompt.confirm("  Overwrite? [y/N] ")? {
            println!("  {}", formatter.info("SKIP opencode.json (keeping existing)"));
            return Ok(SetupOutcome::ConfigKept);
        }
    }

    let package_json = paths.config_dir.join("package.json");
    if package_json.is_file() {
        let content = fs::read_to_string(&package_json)?;
        if content.contains(DESKTOP_PACKAGE_MARKER) {
            println!("  {}", formatter.info("Detected OpenCode Desktop package.json (not touching it)"));
        }
    }

    fs::write(&paths.config_target, config)?;
    println!("  {}", formatter.success(&format!("Written to {}", paths.config_target.display())));
    Ok(SetupOutcome::Complete)
}
