// Application configuration, loaded from environment variables and CLI flags.

use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Base websocket URL of the game server, without a trailing slash.
    pub game_server_url: String,
    /// Wait before dialing the game server, so it can finish creating the game.
    pub connect_delay: Duration,
    /// Upper bound on the websocket handshake.
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8081,
            game_server_url: "ws://localhost:8080".to_string(),
            connect_delay: Duration::from_millis(1000),
            connect_timeout: Duration::from_millis(10_000),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `PORT` - HTTP server port (default: 8081)
    /// - `GAME_SERVER_URL` - game server websocket URL (default: `ws://localhost:8080`)
    /// - `CONNECT_DELAY_MS` - delay before connecting to a game (default: 1000)
    /// - `CONNECT_TIMEOUT_MS` - websocket handshake timeout (default: 10000)
    ///
    /// CLI flags:
    /// - `--port <PORT>` - Override the port
    /// - `--game-server <URL>` - Override the game server URL
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();

        // CLI flag takes precedence, then env var, then default
        let port = Self::parse_cli_value(args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| env("PORT").and_then(|v| v.parse().ok()))
            .unwrap_or(defaults.port);

        let game_server_url = Self::parse_cli_value(args, "--game-server")
            .or_else(|| env("GAME_SERVER_URL"))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.game_server_url);

        let millis = |key: &str| {
            env(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };
        let connect_delay = millis("CONNECT_DELAY_MS").unwrap_or(defaults.connect_delay);
        let connect_timeout = millis("CONNECT_TIMEOUT_MS").unwrap_or(defaults.connect_timeout);

        Config {
            port,
            game_server_url,
            connect_delay,
            connect_timeout,
        }
    }

    /// Parse a CLI flag value like `--port 8081`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(&args(&["aimachine"]), |_| None);
        assert_eq!(config.port, 8081);
        assert_eq!(config.game_server_url, "ws://localhost:8080");
        assert_eq!(config.connect_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_cli_overrides_env() {
        let env: HashMap<&str, &str> = [
            ("PORT", "9000"),
            ("GAME_SERVER_URL", "ws://env:1"),
            ("CONNECT_TIMEOUT_MS", "250"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_sources(
            &args(&["aimachine", "--port", "9100", "--game-server", "ws://cli:2/"]),
            |key| env.get(key).map(|v| v.to_string()),
        );
        assert_eq!(config.port, 9100);
        assert_eq!(config.game_server_url, "ws://cli:2");
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_sources(&args(&["aimachine", "--port", "x"]), |key| {
            (key == "CONNECT_DELAY_MS").then(|| "soon".to_string())
        });
        assert_eq!(config.port, 8081);
        assert_eq!(config.connect_delay, Duration::from_secs(1));
    }
}
