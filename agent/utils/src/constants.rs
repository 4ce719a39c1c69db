use log::LevelFilter;

pub const DEFAULT_AGENT_LEVEL_FILTER: LevelFilter = LevelFilter::Info;

/// The program that is run when no path to eksctl has been configured.
pub const DEFAULT_EKSCTL: &str = "eksctl";

/// The environment variable that overrides the path to eksctl.
pub const ENV_EKSCTL_PATH: &str = "EKSCTL_PATH";

pub const DEFAULT_REGION: &str = "us-west-2";
