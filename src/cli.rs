use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Oracle proxy keeper: refreshes the proxy when it lags the source oracle.
#[derive(Debug, Parser)]
#[command(name = "oracle-keeper", version, about)]
pub struct Cli {
    /// Decide and log the transaction without broadcasting it
    #[arg(long)]
    pub dry_run: bool,

    /// Directory holding default.toml and <environment>.toml
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,

    #[arg(long, env = "APP_ENVIRONMENT", default_value = "development")]
    pub environment: String,
}

impl Cli {
    /// 先加载 `.env`（只补充未设置的变量），再解析参数，
    /// 这样 `APP_ENVIRONMENT` 也可以来自 `.env`。返回命中的 `.env` 路径
    pub fn load() -> (Self, Option<PathBuf>) {
        Self::load_with(dotenvy::dotenv, std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    fn load_with<F, I, T>(load_env: F, args: I) -> Result<(Self, Option<PathBuf>), clap::Error>
    where
        F: FnOnce() -> dotenvy::Result<PathBuf>,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let env_file = load_env().ok();
        let cli = Self::try_parse_from(args)?;
        Ok((cli, env_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["oracle-keeper"]).unwrap();
        assert!(!cli.dry_run);
        assert_eq!(cli.config_dir, PathBuf::from("config"));
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from([
            "oracle-keeper",
            "--dry-run",
            "--config-dir",
            "/etc/keeper",
            "--environment",
            "production",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.config_dir, PathBuf::from("/etc/keeper"));
        assert_eq!(cli.environment, "production");
    }

    #[test]
    fn environment_can_come_from_env_file() {
        let dir = std::env::temp_dir().join(format!("keeper-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let env_file = dir.join(".env");
        fs::write(&env_file, "APP_ENVIRONMENT=staging\n").unwrap();

        let (cli, loaded) = Cli::load_with(
            || dotenvy::from_path_override(&env_file).map(|_| env_file.clone()),
            ["oracle-keeper"],
        )
        .unwrap();
        assert_eq!(loaded.as_deref(), Some(env_file.as_path()));
        assert_eq!(cli.environment, "staging");
        let _ = fs::remove_dir_all(&dir);
    }
}
