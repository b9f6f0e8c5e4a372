use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.sorted_entries() {
        let value = get_value_for_key(config, key);
        writeln!(w, "  {key}: {value} <- {source}")?;
    }

    Ok(())
}

fn get_value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "defaults.remote" => config.remote.clone(),
        "defaults.branch" => config.branch.clone(),
        "output.plain" => config.plain.to_string(),
        "output.quiet" => config.quiet.to_string(),
        "behavior.lenient_exit" => config.lenient_exit.to_string(),
        _ => "(unknown)".to_string(),
    }
}
