use crate::domain::model::Formality;
use crate::infrastructure::config::Config;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deepl-doc")]
#[command(about = "Translate a whole document with the DeepL document API.")]
#[command(version)]
pub struct Cli {
    /// Document to translate (defaults to the first .html file in the current directory)
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Where to write the translation (defaults to <input>.<target>.<ext>)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Source language code, auto-detected when omitted
    #[arg(short = 's', long)]
    pub source: Option<String>,

    /// Target language code
    #[arg(short = 't', long)]
    pub target: Option<String>,

    /// DeepL API key (falls back to DEEPL_API_KEY)
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Use the DeepL API Free endpoint
    #[arg(short = 'r', long)]
    pub free: bool,

    /// Formality of the translation
    #[arg(short = 'f', long, value_enum)]
    pub formality: Option<FormalityArg>,

    /// Show debug output
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Print account usage after translating
    #[arg(short = 'u', long = "usagelimit")]
    pub usage: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormalityArg {
    More,
    Less,
}

impl From<FormalityArg> for Formality {
    fn from(arg: FormalityArg) -> Self {
        match arg {
            FormalityArg::More => Formality::More,
            FormalityArg::Less => Formality::Less,
        }
    }
}

impl Cli {
    pub fn formality(&self) -> Option<Formality> {
        self.formality.map(Formality::from)
    }

    /// Overlay command-line flags on the file configuration
    pub fn apply_to(&self, config: &mut Config, env_key: Option<String>) {
        if let Some(key) = self.key.clone().or(env_key).filter(|k| !k.trim().is_empty()) {
            config.api_key = Some(key);
        }
        if self.free {
            config.free_api = true;
        }
        if let Some(target) = self.target.as_ref().filter(|t| !t.trim().is_empty()) {
            config.target_lang = target.trim().to_string();
        }
        if self.debug {
            config.logging.enable = true;
            config.logging.level = "DEBUG".to_string();
        }
    }
}
