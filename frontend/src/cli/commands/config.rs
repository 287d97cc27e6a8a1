//! Config command handler

use anyhow::{bail, Context as _, Result};

use super::Context;
use crate::cli::args::ConfigAction;

pub fn run(ctx: &Context, action: Option<ConfigAction>) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let yaml = serde_yaml::to_string(&ctx.config).context("Failed to render config")?;
            println!("# {}", ctx.config_path.display());
            print!("{yaml}");
            println!("# token file: {}", ctx.config.token_file().display());
        }
        ConfigAction::Init { force } => {
            if ctx.config_path.exists() && !force {
                bail!(
                    "Tệp cấu hình đã tồn tại: {} (dùng --force để ghi đè)",
                    ctx.config_path.display()
                );
            }
            ctx.config.save(&ctx.config_path)?;
            println!("✓ Đã ghi cấu hình vào {}", ctx.config_path.display());
        }
    }
    Ok(())
}
