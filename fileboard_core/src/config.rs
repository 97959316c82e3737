use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The one email allowed to upload and delete files.
    pub admin_email: String,
    /// HS256 secret shared with the identity provider. Empty means the
    /// verifier rejects every token instead of the server refusing to start.
    pub token_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    pub upload_dir: PathBuf,
    pub metadata_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: "happycloud@kakao.com".to_string(),
            token_secret: String::new(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            metadata_path: PathBuf::from("uploads_metadata.json"),
            static_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.auth.admin_email.is_empty() {
            return Err(ConfigError::Message(
                "Admin email cannot be empty".to_string(),
            ));
        }

        if self.auth.token_secret.is_empty() {
            tracing::warn!("No token secret configured - all admin requests will be rejected");
        }

        if self.files.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "Upload directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn create_directories(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.files.upload_dir)?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
