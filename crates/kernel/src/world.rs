use glam::Vec3;
use liminal_assets::{EffectKind, ItemCatalog, ItemId};
use liminal_common::{EntityId, ThemeId, TileCoord};
use liminal_input::Intent;
use liminal_stream::{ResidencyHandler, StreamConfig, StreamState, StreamStats, TileGrid};
use liminal_tilegen::{Destination, GenContext};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

use crate::collision::CollisionResolver;
use crate::config::{ConfigError, SessionConfig};
use crate::events::{Notification, WorldEvent};
use crate::inventory::{Inventory, InventoryError};
use crate::observer::{MAX_VITAL, Observer};
use crate::portal::{Portal, PortalError, resolve_destination};
use crate::snapshot::HudSnapshot;
use crate::tiles::WorldContent;

/// Slack for comparisons against accumulated clock values.
const TIME_EPSILON: f64 = 1e-9;

/// The authoritative session state.
///
/// Owned by the tick loop; every mutation goes through an explicit operation
/// and is recorded in the event log. Given the same seed, config and intent
/// sequence, two worlds generate identical geometry.
#[derive(Debug, Clone)]
pub struct World {
    config: SessionConfig,
    catalog: ItemCatalog,
    grid: TileGrid,
    stream: StreamState,
    content: WorldContent,
    observer: Observer,
    collision: CollisionResolver,
    inventory: Inventory,
    theme: ThemeId,
    /// Seconds of movement since the last theme transition.
    walk_time: f64,
    exploration_unlocked: bool,
    /// Session clock, seconds.
    clock: f64,
    tick: u64,
    seed: u64,
    rng: StdRng,
    /// Clock time at which an active lighting boost ends.
    light_boost_until: Option<f64>,
    notifications: Vec<Notification>,
    nearby_portal: Option<EntityId>,
    event_log: Vec<WorldEvent>,
}

/// Bridges residency transitions to generation and the registries.
struct TileLoader<'a> {
    content: &'a mut WorldContent,
    rng: &'a mut StdRng,
    events: &'a mut Vec<WorldEvent>,
    ctx: GenContext<'a>,
}

impl ResidencyHandler for TileLoader<'_> {
    fn load(&mut self, coord: TileCoord) {
        let ctx = GenContext { coord, ..self.ctx };
        let contents = liminal_tilegen::generate(&ctx, &mut *self.rng);
        let placements = self.content.insert_tile(contents);
        self.events.push(WorldEvent::TileLoaded {
            coord,
            theme: ctx.theme,
            placements,
        });
    }

    fn unload(&mut self, coord: TileCoord) {
        if self.content.evict_tile(coord) {
            self.events.push(WorldEvent::TileEvicted { coord });
        }
    }
}

impl World {
    /// Start a session. The initial window around the spawn point is
    /// generated before this returns.
    pub fn new(
        config: SessionConfig,
        catalog: ItemCatalog,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, catalog, seed))
    }

    /// Default config and built-in items with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SessionConfig::default(), ItemCatalog::builtin(), seed)
    }

    fn build(config: SessionConfig, catalog: ItemCatalog, seed: u64) -> Self {
        let spawn = config.spawn_point;
        let mut world = Self {
            grid: TileGrid::new(config.room_size),
            stream: StreamState::new(StreamConfig {
                render_radius: config.render_radius,
            }),
            content: WorldContent::new(),
            observer: Observer::spawn(spawn),
            collision: CollisionResolver::new(config.player.collision_radius),
            inventory: Inventory::new(),
            theme: config.start_theme,
            walk_time: 0.0,
            exploration_unlocked: false,
            clock: 0.0,
            tick: 0,
            seed,
            rng: StdRng::seed_from_u64(seed),
            light_boost_until: None,
            notifications: Vec::new(),
            nearby_portal: None,
            event_log: Vec::new(),
            config,
            catalog,
        };
        tracing::info!(seed, theme = %world.theme, "session started");
        world.stream_around(spawn);
        world
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Session clock in seconds.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn content(&self) -> &WorldContent {
        &self.content
    }

    pub fn walk_time(&self) -> f64 {
        self.walk_time
    }

    pub fn exploration_unlocked(&self) -> bool {
        self.exploration_unlocked
    }

    pub fn lighting_boosted(&self) -> bool {
        self.light_boost_until.is_some()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn resident_tiles(&self) -> &BTreeSet<TileCoord> {
        self.stream.resident_tiles()
    }

    pub fn stream_stats(&self) -> &StreamStats {
        self.stream.stats()
    }

    /// Tile containing the observer.
    pub fn observer_tile(&self) -> TileCoord {
        self.grid.position_to_tile(self.observer.position)
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// The inputs a tile generated right now at `coord` would receive.
    pub fn generation_context(&self, coord: TileCoord) -> GenContext<'_> {
        GenContext {
            coord,
            theme: self.theme,
            room_size: self.config.room_size,
            exploration_unlocked: self.exploration_unlocked,
            walk_time: self.walk_time,
            portal_radius: self.config.interaction_radius,
            spawn: self.config.spawn_point,
            spawn_clearance: self.config.player.collision_radius,
            catalog: &self.catalog,
        }
    }

    /// Advance the session by `dt` seconds.
    ///
    /// Order within a tick: look and movement intent, collision, commit,
    /// gravity, streaming around the committed position, discrete actions and
    /// portal proximity, scheduled effects, then the snapshot.
    pub fn step(&mut self, intent: &Intent, dt: f32) -> HudSnapshot {
        self.tick += 1;
        let _span = tracing::debug_span!("tick", tick = self.tick).entered();
        self.clock += f64::from(dt);

        self.observer.look(intent.look);
        let displacement = self.observer.planar_step(intent, &self.config.player, dt);
        if intent.is_moving() {
            self.accumulate_walk(f64::from(dt));
        }

        let resolution =
            self.collision
                .resolve(self.content.obstacles().iter(), self.observer.position, displacement);
        self.observer.position = resolution.position;

        self.observer.vertical_step(intent.jump, &self.config.player, dt);

        self.stream_around(self.observer.position);

        if intent.collect {
            self.collect_nearby();
        }
        for name in &intent.use_items {
            if let Err(err) = self.use_item(name) {
                tracing::debug!(item = %name, %err, "use item ignored");
            }
        }
        if intent.drop_oldest {
            if let Err(err) = self.drop_oldest() {
                tracing::debug!(%err, "drop ignored");
            }
        }
        self.update_portal_proximity();
        if intent.interact {
            match self.try_interact().map(|p| p.id) {
                Some(id) => {
                    if let Err(err) = self.activate_portal(id) {
                        tracing::debug!(%err, "interact ignored");
                    }
                }
                None => tracing::trace!("nothing to interact with"),
            }
        }

        self.expire_scheduled();
        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
        self.snapshot()
    }

    /// Pick up every uncollected collectible in reach, nearest tile order
    /// first, until the inventory is full. Returns how many were taken.
    pub fn collect_nearby(&mut self) -> usize {
        let position = self.observer.position;
        let reach = self.config.collect_radius;
        let mut taken = 0;

        for index in 0..self.content.collectibles().len() {
            let collectible = self.content.collectibles()[index];
            if collectible.collected || collectible.position.distance(position) >= reach {
                continue;
            }
            match self.inventory.push(collectible.item) {
                Ok(held) => {
                    self.content.collectibles_mut()[index].collected = true;
                    self.event_log.push(WorldEvent::CollectibleCollected {
                        id: collectible.id,
                        tile: collectible.tile,
                        item: collectible.item,
                    });
                    let text = format!(
                        "Collected: {}! ({held}/{})",
                        self.catalog.name_of(collectible.item),
                        self.inventory.capacity()
                    );
                    self.notify(text);
                    taken += 1;
                }
                Err(err) => {
                    tracing::debug!(%err, "collect stopped");
                    let cap = self.inventory.capacity();
                    self.notify(format!(
                        "Inventory full! ({cap}/{cap}) Drop items or use them first."
                    ));
                    break;
                }
            }
        }
        taken
    }

    /// Use the oldest held item named `name`. Returns whether it was consumed.
    pub fn use_item(&mut self, name: &str) -> Result<bool, InventoryError> {
        let held = self
            .catalog
            .find_by_name(name)
            .filter(|id| self.inventory.contains(*id));
        let held = held.and_then(|id| self.catalog.get(id).map(|item| (id, item.clone())));
        let Some((id, item)) = held else {
            self.notify(format!("You don't have any {name}!"));
            return Err(InventoryError::NotHeld);
        };

        let consumed = match item.effect {
            EffectKind::Energy => {
                if self.observer.energy < MAX_VITAL {
                    self.observer.restore_energy(item.magnitude);
                    self.notify(format!("Used {}. Energy restored!", item.name));
                    true
                } else {
                    self.notify("Energy is already full!");
                    false
                }
            }
            EffectKind::Health => {
                if self.observer.health < MAX_VITAL {
                    self.observer.restore_health(item.magnitude);
                    self.notify(format!("Used {}. Health restored!", item.name));
                    true
                } else {
                    self.notify("Health is already full!");
                    false
                }
            }
            EffectKind::Light => {
                let until = self.clock + self.config.light_boost_secs;
                self.light_boost_until = Some(until);
                self.event_log.push(WorldEvent::LightingBoosted { until });
                self.notify(format!("Used {}. Area is brighter!", item.name));
                true
            }
            EffectKind::Lore => {
                self.notify(format!("{} - A mysterious item...", item.name));
                false
            }
        };

        if consumed {
            self.inventory.remove_first(id)?;
        }
        self.event_log.push(WorldEvent::ItemUsed { item: id, consumed });
        Ok(consumed)
    }

    /// Discard the oldest held item.
    pub fn drop_oldest(&mut self) -> Result<ItemId, InventoryError> {
        match self.inventory.drop_oldest() {
            Ok(item) => {
                let text = format!(
                    "Dropped: {}! ({}/{})",
                    self.catalog.name_of(item),
                    self.inventory.len(),
                    self.inventory.capacity()
                );
                self.notify(text);
                self.event_log.push(WorldEvent::ItemDropped { item });
                Ok(item)
            }
            Err(err) => {
                self.notify("No items to drop!");
                Err(err)
            }
        }
    }

    /// Nearest portal within its activation radius of the observer. Never
    /// triggers anything by itself.
    pub fn try_interact(&self) -> Option<&Portal> {
        self.content.portals().nearest_within(self.observer.position)
    }

    /// Go through a portal: resolve its destination, tear the current world
    /// down completely, then generate the new theme around the spawn point.
    pub fn activate_portal(&mut self, id: EntityId) -> Result<ThemeId, PortalError> {
        let portal = match self.content.portals().get(id) {
            Ok(portal) => *portal,
            Err(err) => {
                tracing::warn!(portal = %id.short(), "activation of unknown portal");
                return Err(err);
            }
        };

        let from = self.theme;
        let to = resolve_destination(portal.destination, from, &mut self.rng);
        let message = match portal.destination {
            Destination::Random => format!("Teleporting to {}...", to.name()),
            Destination::Fixed(ThemeId::Backrooms) => {
                format!("Returning to {}...", ThemeId::Backrooms.name())
            }
            Destination::Fixed(theme) => format!("Entering {}...", theme.name()),
        };
        tracing::info!(%from, %to, kind = portal.kind.label(), "theme transition");

        self.teardown();
        self.theme = to;
        self.event_log.push(WorldEvent::ThemeChanged { from, to });
        self.observer.respawn(self.config.spawn_point);
        self.walk_time = 0.0;
        self.exploration_unlocked = false;
        self.notify(message);
        self.stream_around(self.config.spawn_point);
        Ok(to)
    }

    /// Current presentation snapshot.
    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            tick: self.tick,
            theme: self.theme,
            position: self.observer.position,
            health: self.observer.health,
            energy: self.observer.energy,
            walk_time: self.walk_time,
            exploration_threshold: self.config.exploration_threshold_secs,
            exploration_unlocked: self.exploration_unlocked,
            inventory: self
                .inventory
                .iter()
                .map(|id| self.catalog.name_of(id).to_string())
                .collect(),
            inventory_capacity: self.inventory.capacity(),
            lighting_boosted: self.lighting_boosted(),
            nearby_portal: self
                .nearby_portal
                .and_then(|id| self.content.portals().get(id).ok())
                .map(|p| p.kind),
            notifications: self.notifications.iter().map(|n| n.text.clone()).collect(),
        }
    }

    fn accumulate_walk(&mut self, dt: f64) {
        self.walk_time += dt;
        if !self.exploration_unlocked
            && self.walk_time + TIME_EPSILON >= self.config.exploration_threshold_secs
        {
            self.exploration_unlocked = true;
            tracing::info!(theme = %self.theme, walk_time = self.walk_time, "exploration unlocked");
            self.event_log
                .push(WorldEvent::ExplorationUnlocked { theme: self.theme });
            self.notify("You have explored enough! Doors may now appear.");
        }
    }

    /// Split borrows: the stream controller plus a loader over everything it
    /// drives.
    fn loader(&mut self) -> (&mut StreamState, TileLoader<'_>) {
        let ctx = GenContext {
            coord: TileCoord::default(),
            theme: self.theme,
            room_size: self.config.room_size,
            exploration_unlocked: self.exploration_unlocked,
            walk_time: self.walk_time,
            portal_radius: self.config.interaction_radius,
            spawn: self.config.spawn_point,
            spawn_clearance: self.config.player.collision_radius,
            catalog: &self.catalog,
        };
        let loader = TileLoader {
            content: &mut self.content,
            rng: &mut self.rng,
            events: &mut self.event_log,
            ctx,
        };
        (&mut self.stream, loader)
    }

    fn stream_around(&mut self, position: Vec3) {
        let viewer = self.grid.position_to_tile(position);
        let (stream, mut loader) = self.loader();
        stream.ensure_resident(viewer, &mut loader);
    }

    /// Remove every tile, registry entry, scheduled effect and notification.
    fn teardown(&mut self) {
        let (stream, mut loader) = self.loader();
        let dropped = stream.reset(&mut loader);
        debug_assert!(self.content.tiles().is_empty());
        debug_assert!(self.content.obstacles().is_empty());
        tracing::debug!(tiles = dropped.len(), "world torn down");

        if self.light_boost_until.take().is_some() {
            self.event_log.push(WorldEvent::LightingRestored);
        }
        self.notifications.clear();
        self.nearby_portal = None;
    }

    fn update_portal_proximity(&mut self) {
        let nearest = self.try_interact().map(|p| (p.id, p.prompt()));
        let id = nearest.map(|(id, _)| id);
        if id != self.nearby_portal {
            self.nearby_portal = id;
            if let Some((_, prompt)) = nearest {
                self.notify(prompt);
            }
        }
    }

    fn expire_scheduled(&mut self) {
        if let Some(until) = self.light_boost_until {
            if self.clock + TIME_EPSILON >= until {
                self.light_boost_until = None;
                self.event_log.push(WorldEvent::LightingRestored);
                tracing::debug!("lighting restored");
            }
        }
        let now = self.clock;
        self.notifications.retain(|n| n.expires_at > now + TIME_EPSILON);
    }

    fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(%text, "notification");
        self.notifications.push(Notification {
            text,
            expires_at: self.clock + self.config.notification_secs,
        });
    }
}
