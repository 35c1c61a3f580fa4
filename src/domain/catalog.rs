// Game catalog - fixed per-game metric vocabularies
use crate::domain::error::ReportError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    Wars,
    DeathRun,
    HideAndSeek,
    SurvivalGames,
    MurderMystery,
    SkyWars,
    CaptureTheFlag,
    BlockDrop,
    GroundWars,
    JustBuild,
    BlockParty,
    TheBridge,
    Gravity,
}

pub const ALL_GAMES: [Game; 13] = [
    Game::Wars,
    Game::DeathRun,
    Game::HideAndSeek,
    Game::SurvivalGames,
    Game::MurderMystery,
    Game::SkyWars,
    Game::CaptureTheFlag,
    Game::BlockDrop,
    Game::GroundWars,
    Game::JustBuild,
    Game::BlockParty,
    Game::TheBridge,
    Game::Gravity,
];

impl Game {
    /// Short identifier used by the upstream API in URL paths
    pub fn id(&self) -> &'static str {
        match self {
            Game::Wars => "wars",
            Game::DeathRun => "dr",
            Game::HideAndSeek => "hide",
            Game::SurvivalGames => "sg",
            Game::MurderMystery => "murder",
            Game::SkyWars => "sky",
            Game::CaptureTheFlag => "ctf",
            Game::BlockDrop => "drop",
            Game::GroundWars => "ground",
            Game::JustBuild => "build",
            Game::BlockParty => "party",
            Game::TheBridge => "bridge",
            Game::Gravity => "grav",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Game::Wars => "Treasure Wars",
            Game::DeathRun => "DeathRun",
            Game::HideAndSeek => "Hide and Seek",
            Game::SurvivalGames => "Survival Games",
            Game::MurderMystery => "Murder Mystery",
            Game::SkyWars => "SkyWars",
            Game::CaptureTheFlag => "Capture the Flag",
            Game::BlockDrop => "Block Drop",
            Game::GroundWars => "Ground Wars",
            Game::JustBuild => "Just Build",
            Game::BlockParty => "Block Party",
            Game::TheBridge => "The Bridge",
            Game::Gravity => "Gravity",
        }
    }

    /// The ordered metric vocabulary this game's monthly endpoint can report.
    /// Requested metrics are validated against this list before any fetch.
    pub fn metrics(&self) -> &'static [&'static str] {
        match self {
            Game::Wars => &[
                "kills",
                "deaths",
                "played",
                "xp",
                "victories",
                "treasure_destroyed",
                "final_kills",
                "prestige",
                "uncapped_xp",
            ],
            Game::DeathRun => &[
                "kills",
                "deaths",
                "played",
                "xp",
                "victories",
                "activated",
                "uncapped_xp",
            ],
            Game::HideAndSeek => &[
                "seeker_kills",
                "hider_kills",
                "deaths",
                "played",
                "xp",
                "victories",
            ],
            Game::SurvivalGames => &[
                "kills",
                "deaths",
                "played",
                "xp",
                "victories",
                "uncapped_xp",
            ],
            Game::MurderMystery => &[
                "kills",
                "deaths",
                "played",
                "xp",
                "victories",
                "prestige",
                "uncapped_xp",
                "murderer_eliminations",
                "murders",
                "coins",
            ],
            Game::SkyWars => &[
                "kills",
                "deaths",
                "played",
                "xp",
                "victories",
                "mystery_chests_destroyed",
                "uncapped_xp",
                "spells_used",
                "ores_mined",
            ],
            Game::CaptureTheFlag => &[
                "kills",
                "deaths",
                "played",
                "xp",
                "victories",
                "flags_returned",
                "flags_captured",
                "assists",
            ],
            Game::BlockDrop => &[
                "vaults_used",
                "deaths",
                "played",
                "xp",
                "victories",
                "powerups_collected",
                "blocks_destroyed",
            ],
            Game::GroundWars => &[
                "kills",
                "deaths",
                "played",
                "xp",
                "victories",
                "projectiles_fired",
                "blocks_placed",
                "blocks_destroyed",
            ],
            Game::JustBuild => &[
                "rating_great_received",
                "rating_okay_received",
                "rating_meh_received",
                "rating_love_received",
                "rating_good_received",
                "uncapped_xp",
                "victories",
            ],
            Game::BlockParty => &[
                "rounds_survived",
                "played",
                "xp",
                "victories",
                "powerups_collected",
            ],
            Game::TheBridge => &["kills", "goals", "deaths", "played", "xp", "victories"],
            Game::Gravity => &[
                "maps_completed",
                "maps_completed_without_dying",
                "deaths",
                "played",
                "xp",
                "victories",
            ],
        }
    }

    pub fn has_metric(&self, metric: &str) -> bool {
        self.metrics().contains(&metric)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Game {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_GAMES
            .iter()
            .copied()
            .find(|g| g.id() == s)
            .ok_or_else(|| ReportError::UnknownGame(s.to_string()))
    }
}
