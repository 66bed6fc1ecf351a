use crate::core::options::{Engine, SqitchOptions};
use clap::Args;
use std::path::PathBuf;

/// sqitch attributes accepted on the command line. Each one overrides the
/// config file value of the same name.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Database engine (pg, sqlite, oracle)
    #[arg(long)]
    pub engine: Option<Engine>,

    /// File extension of deploy, revert and verify scripts
    #[arg(long)]
    pub extension: Option<String>,

    /// Location of the plan file
    #[arg(long)]
    pub plan_file: Option<String>,

    /// Path to the database client executable (e.g. psql)
    #[arg(long)]
    pub db_client: Option<String>,

    /// Name of the database to connect to
    #[arg(long)]
    pub db_name: Option<String>,

    /// Database user to connect as
    #[arg(long)]
    pub db_user: Option<String>,

    /// Database host to connect to
    #[arg(long)]
    pub db_host: Option<String>,

    /// Database port to connect to
    #[arg(long)]
    pub db_port: Option<u16>,

    /// Directory holding the change scripts and plan file
    #[arg(long)]
    pub top_dir: Option<String>,

    #[arg(long)]
    pub deploy_dir: Option<String>,

    #[arg(long)]
    pub revert_dir: Option<String>,

    #[arg(long)]
    pub verify_dir: Option<String>,

    /// System user to run sqitch as
    #[arg(long)]
    pub user: Option<String>,
}

impl OptionArgs {
    /// Convert to options, attaching the target tag for deploy/revert
    pub fn into_options(self, to_target: Option<String>) -> SqitchOptions {
        SqitchOptions {
            engine: self.engine,
            extension: self.extension,
            plan_file: self.plan_file,
            db_client: self.db_client,
            db_name: self.db_name,
            db_user: self.db_user,
            db_host: self.db_host,
            db_port: self.db_port,
            top_dir: self.top_dir,
            deploy_dir: self.deploy_dir,
            revert_dir: self.revert_dir,
            verify_dir: self.verify_dir,
            to_target,
            user: self.user,
        }
    }
}

/// Settings shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub config_path: Option<PathBuf>,
    pub why_run: bool,
}
