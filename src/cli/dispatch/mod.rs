use crate::cli::actions::Action;
use anyhow::Result;
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(45981),
        credentials_file: matches
            .get_one::<PathBuf>("credentials-file")
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --credentials-file"))?,
        gateway_url: matches
            .get_one("gateway-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --gateway-url"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_builds_server_action() {
        let matches = commands::new().get_matches_from(vec![
            "pesan",
            "--credentials-file",
            "credentials.txt",
            "--gateway-url",
            "http://localhost:3000",
        ]);

        let action = handler(&matches).unwrap();

        let Action::Server {
            port,
            credentials_file,
            gateway_url,
        } = action;

        assert_eq!(port, 45981);
        assert_eq!(credentials_file, PathBuf::from("credentials.txt"));
        assert_eq!(gateway_url, "http://localhost:3000");
    }
}
