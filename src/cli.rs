use std::path::PathBuf;

use booru_common::BooruSelector;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "Booru Importer", author, version, about, long_about = None)]
pub struct Cli {
    /// Which imageboard to import from
    #[clap(value_enum, ignore_case = true)]
    pub booru: BooruSelector,

    /// Search query, passed to the imageboard as typed
    ///
    /// Use double quotes around queries containing single quotes
    pub query: String,

    /// Path to the config file
    ///
    /// Defaults to ./config.toml, then to config.toml inside the importer's config directory
    #[clap(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Single quotes usually mean the shell did not split the query the way the user expected.
    #[inline]
    pub fn query_has_single_quote(&self) -> bool {
        self.query.contains('\'')
    }
}

#[cfg(test)]
mod test {
    use booru_common::BooruSelector;
    use clap::Parser;

    use super::Cli;

    #[test]
    fn parses_positionals() {
        let cli = Cli::parse_from(["booru-import", "all", "1girl solo", "--config", "x.toml"]);
        assert_eq!(cli.booru, BooruSelector::All);
        assert_eq!(cli.query, "1girl solo");
        assert!(!cli.query_has_single_quote());
    }

    #[test]
    fn rejects_unknown_booru() {
        assert!(Cli::try_parse_from(["booru-import", "e621", "tag"]).is_err());
    }

    #[test]
    fn flags_single_quotes() {
        let cli = Cli::parse_from(["booru-import", "konachan", "'scenery'"]);
        assert!(cli.query_has_single_quote());
    }
}
