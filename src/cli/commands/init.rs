//! Implementation of the `tidings init` command.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::context::AppContext;
use crate::cli::display::action_success;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::{ConfigLoader, CONFIG_DIR};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub config_path: PathBuf,
    pub config_written: bool,
    pub database_path: String,
    pub active_year: i32,
    pub milestones_ready: usize,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        if self.config_written {
            lines.push(action_success(&format!("Wrote configuration to {}", self.config_path.display())));
        } else {
            lines.push(format!(
                "Configuration already exists at {} (use --force to overwrite)",
                self.config_path.display()
            ));
        }
        lines.push(action_success(&format!("Database ready at {}", self.database_path)));
        lines.push(format!(
            "Planning {} with {} milestones",
            self.active_year, self.milestones_ready
        ));
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_DIR).join("config.yaml");
    let config_written = ConfigLoader::write_default(&config_path, args.force)?;

    let ctx = AppContext::open(config).await?;
    ctx.planning.check_and_rollover_if_needed().await?;
    let (active_year, milestones) = ctx.milestones.active_milestones().await?;

    let out = InitOutput {
        success: true,
        config_path,
        config_written,
        database_path: config.database.path.clone(),
        active_year,
        milestones_ready: milestones.len(),
    };
    output(&out, json_mode);
    Ok(())
}
