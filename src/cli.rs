use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "grs-render", about = "Render GitHub stats SVG cards", version)]
pub struct Cli {
    /// Upstream github-readme-stats checkout (overrides GRS_DIR).
    #[arg(long = "grs-dir")]
    pub grs_dir: Option<String>,

    /// Destination directory for the rendered SVGs (overrides OUT_DIR).
    #[arg(long = "out-dir")]
    pub out_dir: Option<String>,

    /// GitHub username the cards are rendered for (overrides GRS_USERNAME).
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Card theme, passed through to the upstream renderers (overrides GRS_THEME).
    #[arg(long)]
    pub theme: Option<String>,

    /// Layout of the top-languages card (overrides GRS_LANGS_LAYOUT).
    #[arg(long = "langs-layout")]
    pub langs_layout: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
