extern crate playtime_hud;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use playtime_hud::hud::{BarColor, BossBar, BossBarDisplay, HudCommand, PlaytimeHud};
use playtime_hud::player::{LocalPlayer, LocalRegistry, PlayerId};
use playtime_hud::playtime::{PlaytimeSource, DAILY_PLAYTIME_SECS};

#[derive(Clone, Default)]
struct StubSource(Arc<Mutex<HashMap<PlayerId, i64>>>);

impl StubSource {
    fn set(&self, player: PlayerId, seconds: i64) {
        self.0.lock().unwrap().insert(player, seconds);
    }
}

impl PlaytimeSource for StubSource {
    fn seconds_remaining(&self, player: PlayerId) -> i64 {
        self.0
            .lock()
            .unwrap()
            .get(&player)
            .copied()
            .unwrap_or(DAILY_PLAYTIME_SECS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Call {
    Show,
    Update,
    Hide,
}

#[derive(Clone, Default)]
struct RecordingDisplay(Arc<Mutex<Vec<(Call, PlayerId)>>>);

impl RecordingDisplay {
    fn calls(&self) -> Vec<(Call, PlayerId)> {
        self.0.lock().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl BossBarDisplay for RecordingDisplay {
    fn show(&self, player: PlayerId, _bar: &BossBar) {
        self.0.lock().unwrap().push((Call::Show, player));
    }

    fn update(&self, player: PlayerId, _bar: &BossBar) {
        self.0.lock().unwrap().push((Call::Update, player));
    }

    fn hide(&self, player: PlayerId, _bar: &BossBar) {
        self.0.lock().unwrap().push((Call::Hide, player));
    }
}

fn populated_registry(players: &[(PlayerId, &str)]) -> LocalRegistry {
    let registry = LocalRegistry::default();
    for &(id, name) in players {
        registry.connect(LocalPlayer::new(id, name)).unwrap();
    }
    registry
}

#[tokio::test(start_paused = true)]
async fn first_tick_fires_immediately() {
    let source = StubSource::default();
    source.set(7, 125);
    let display = RecordingDisplay::default();
    let registry = populated_registry(&[(7, "steve")]);

    let ct = CancellationToken::new();
    let hud = PlaytimeHud::start(source, display.clone(), registry, ct.clone());
    time::sleep(Duration::from_millis(10)).await;

    let bar = hud.bar(7).unwrap().expect("bar after the first tick");
    assert_eq!(bar.name(), "Remaining playtime: 02:05");
    assert_eq!(bar.color(), BarColor::Yellow);
    assert_eq!(display.calls()[0], (Call::Show, 7));

    ct.cancel();
    hud.into_worker().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn labels_follow_the_source_every_tick() {
    let source = StubSource::default();
    source.set(7, 2000);
    let display = RecordingDisplay::default();
    let registry = populated_registry(&[(7, "steve")]);

    let ct = CancellationToken::new();
    let hud = PlaytimeHud::start(source.clone(), display, registry, ct.clone());
    time::sleep(Duration::from_millis(10)).await;

    let bar = hud.bar(7).unwrap().unwrap();
    assert_eq!(bar.name(), "Remaining playtime: 33:20");
    assert_eq!(bar.color(), BarColor::Red);

    source.set(7, 40);
    time::sleep(Duration::from_secs(1)).await;

    // no stale text, the label reflects the just-computed remaining time
    let bar = hud.bar(7).unwrap().unwrap();
    assert_eq!(bar.name(), "Remaining playtime: 00:40");
    assert_eq!(bar.color(), BarColor::Yellow);

    ct.cancel();
    hud.into_worker().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn exhausted_allowance_reads_complete() {
    let source = StubSource::default();
    source.set(7, -5);
    let display = RecordingDisplay::default();
    let registry = populated_registry(&[(7, "steve")]);

    let ct = CancellationToken::new();
    let hud = PlaytimeHud::start(source, display, registry, ct.clone());
    time::sleep(Duration::from_millis(10)).await;

    let bar = hud.bar(7).unwrap().unwrap();
    assert_eq!(bar.progress(), 1.0);
    assert_eq!(bar.color(), BarColor::Blue);
    assert_eq!(bar.name(), "✅ You've completed today's playtime!");

    ct.cancel();
    hud.into_worker().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn disconnect_command_removes_the_bar() {
    let source = StubSource::default();
    let display = RecordingDisplay::default();
    let registry = populated_registry(&[(1, "alice"), (2, "bob")]);

    let ct = CancellationToken::new();
    let hud = PlaytimeHud::start(source, display.clone(), registry.clone(), ct.clone());
    time::sleep(Duration::from_millis(10)).await;
    assert!(hud.bar(1).unwrap().is_some());
    assert!(hud.bar(2).unwrap().is_some());

    registry.disconnect(2).unwrap();
    hud.remove(2).unwrap();
    time::sleep(Duration::from_secs(1)).await;

    assert!(hud.bar(1).unwrap().is_some());
    assert_eq!(hud.bar(2).unwrap(), None);
    assert!(display.calls().contains(&(Call::Hide, 2)));

    ct.cancel();
    hud.into_worker().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn vanished_player_is_pruned_without_a_command() {
    let source = StubSource::default();
    let display = RecordingDisplay::default();
    let registry = populated_registry(&[(1, "alice"), (2, "bob")]);

    let ct = CancellationToken::new();
    let hud = PlaytimeHud::start(source, display.clone(), registry.clone(), ct.clone());
    time::sleep(Duration::from_millis(10)).await;
    assert!(hud.bar(2).unwrap().is_some());

    // player drops out of the registry mid-pass, no disconnect command sent
    registry.disconnect(2).unwrap();
    time::sleep(Duration::from_secs(1)).await;

    assert_eq!(hud.bar(2).unwrap(), None);
    assert!(display.calls().contains(&(Call::Hide, 2)));

    ct.cancel();
    hud.into_worker().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn refresh_command_updates_between_ticks() {
    let source = StubSource::default();
    source.set(7, 300);
    let display = RecordingDisplay::default();
    let registry = LocalRegistry::default();

    let ct = CancellationToken::new();
    let hud = PlaytimeHud::start(source, display, registry, ct.clone());
    time::sleep(Duration::from_millis(10)).await;
    // nobody online, nothing shown yet
    assert_eq!(hud.bar(7).unwrap(), None);

    hud.command_sender()
        .send(HudCommand::Refresh { player: 7 })
        .unwrap();
    time::sleep(Duration::from_millis(10)).await;

    let bar = hud.bar(7).unwrap().expect("bar after explicit refresh");
    assert_eq!(bar.name(), "Remaining playtime: 05:00");

    ct.cancel();
    hud.into_worker().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn cancelled_worker_stops_updating() {
    let source = StubSource::default();
    let display = RecordingDisplay::default();
    let registry = populated_registry(&[(7, "steve")]);

    let ct = CancellationToken::new();
    let hud = PlaytimeHud::start(source, display.clone(), registry, ct.clone());
    time::sleep(Duration::from_millis(10)).await;

    ct.cancel();
    hud.into_worker().await.unwrap();

    let calls_after_shutdown = display.count();
    time::sleep(Duration::from_secs(3)).await;
    assert_eq!(display.count(), calls_after_shutdown);
}

#[tokio::test(start_paused = true)]
async fn worker_stops_when_every_sender_is_gone() {
    let source = StubSource::default();
    let display = RecordingDisplay::default();
    let registry = populated_registry(&[(7, "steve")]);

    let hud = PlaytimeHud::start(source, display, registry, CancellationToken::new());
    time::sleep(Duration::from_millis(10)).await;

    // into_worker drops the hud and with it the last command sender
    hud.into_worker().await.unwrap();
}
