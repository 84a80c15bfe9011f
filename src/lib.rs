pub mod hud;
pub mod player;
pub mod playtime;
pub mod settings;
