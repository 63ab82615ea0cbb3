use clap::Parser;
use std::path::PathBuf;

/// waves-bootstrap — prepares a Waves node container for startup.
#[derive(Debug, Parser)]
#[command(name = "waves-bootstrap", about)]
pub struct CliArgs {
    /// Base directory holding the node's configs and data.
    #[arg(long, default_value = "/waves")]
    pub base_dir: PathBuf,

    /// Directory the node jar is installed into.
    #[arg(long, default_value = "/waves-node")]
    pub node_dir: PathBuf,

    /// Skip the node jar download; the configuration is still assembled.
    #[arg(long)]
    pub skip_download: bool,
}
