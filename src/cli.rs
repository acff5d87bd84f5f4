use anyhow::Result;
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern compiles")
});

pub fn parse_email(input: &str) -> std::result::Result<String, String> {
    if EMAIL_PATTERN.is_match(input) {
        Ok(input.to_string())
    } else {
        Err("Invalid email format.".to_string())
    }
}

#[derive(Parser)]
#[command(name = "gitcal")]
#[command(about = "Calendar heatmap of your git commits over the last six months")]
#[command(version)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_parser = parse_email,
        help = "Your email address (defaults to git config user.email)"
    )]
    pub email: Option<String>,

    #[arg(short, long, help = "Path to the repository folder (defaults to the current directory)")]
    pub folder: Option<PathBuf>,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::heat::exec(self.email, self.folder, self.json)
    }
}
