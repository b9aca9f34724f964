use pinwheel::{ItemConfig, SelectorItem};
use std::process::{Command, Stdio};

pub fn spawn(command: &str) -> anyhow::Result<()> {
    let argv = shell_words::split(command)?;
    let Some((program, args)) = argv.split_first() else {
        anyhow::bail!("Empty command");
    };

    Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

/// Items from config. One without `exec` only logs its name when picked.
pub fn build_items(configs: &[ItemConfig]) -> Vec<SelectorItem> {
    configs
        .iter()
        .map(|cfg| {
            let name = cfg.name.to_string();
            let exec = cfg.exec.clone();
            SelectorItem::new(cfg.name.to_string(), move || match &exec {
                Some(command) => {
                    if let Err(e) = spawn(command) {
                        log::error!("Failed to run '{}' for '{}': {}", command, name, e);
                    }
                }
                None => log::info!("Picked '{}'", name),
            })
        })
        .collect()
}
