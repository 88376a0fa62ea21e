//! Command line and environment configuration

use crate::state::RaceHostConfig;
use anyhow::Result;
use clap::Parser;
use racer_core::model::DEFAULT_TRACK;
use racer_stores::{load_seed_file, SeedData, StoreLatency};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "racer-server",
    version,
    about = "Arcade Racer game host: race loop, live stream and REST API"
)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "RACER_BIND", default_value = "0.0.0.0:9100")]
    pub bind: SocketAddr,

    /// Base artificial store latency in milliseconds (0 disables it)
    #[arg(long, env = "RACER_STORE_LATENCY_MS", default_value_t = 0)]
    pub store_latency_ms: u64,

    /// Name recorded with finished races
    #[arg(long, env = "RACER_PLAYER_NAME", default_value = "Player")]
    pub player_name: String,

    /// Track recorded with finished races
    #[arg(long, env = "RACER_TRACK", default_value = DEFAULT_TRACK)]
    pub track: String,

    /// JSON file with initial cars, results, settings and a saved race (OPTIONAL: built-in demo data otherwise)
    #[arg(long, env = "RACER_SEED_FILE")]
    pub seed_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn latency(&self) -> StoreLatency {
        StoreLatency::from_millis(self.store_latency_ms)
    }

    pub fn race_host(&self) -> RaceHostConfig {
        RaceHostConfig {
            player_name: self.player_name.clone(),
            track: self.track.clone(),
        }
    }

    pub fn load_seed(&self) -> Result<SeedData> {
        match &self.seed_file {
            Some(path) => load_seed_file(path),
            None => Ok(SeedData::demo()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["racer-server"]).unwrap();
        assert_eq!(config.bind, "0.0.0.0:9100".parse::<SocketAddr>().unwrap());
        assert_eq!(config.latency(), StoreLatency::NONE);
        assert_eq!(config.race_host(), RaceHostConfig::default());
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::try_parse_from([
            "racer-server",
            "--bind",
            "127.0.0.1:8080",
            "--store-latency-ms",
            "100",
            "--player-name",
            "Ace",
            "--track",
            "circuit-beta",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.latency(), StoreLatency::from_millis(100));
        assert_eq!(config.race_host().player_name, "Ace");
        assert_eq!(config.race_host().track, "circuit-beta");
    }

    #[test]
    fn test_missing_seed_file_is_an_error() {
        let config = ServerConfig::try_parse_from([
            "racer-server",
            "--seed-file",
            "/nonexistent/seed.json",
        ])
        .unwrap();
        assert!(config.load_seed().is_err());
    }
}
