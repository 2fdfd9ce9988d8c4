//! Session driver: one player, one level, one turn loop.
//!
//! A [`Session`] owns every collaborator the rules need and builds a
//! [`GameEnv`] over them for each action. Player commands are applied first;
//! a command that spends the player's turn then runs one scheduling cycle so
//! monsters answer before the next command is read.
use std::cmp;
use std::rc::Rc;

use game_content::{Catalog, LOOT, Prototype};
use game_core::combat::screen_name;
use game_core::components::{Skill, SkillUser, can_see};
use game_core::event::{
    AcquireItem, ConsumeItem, DropItem, Equip, GetHealth, GetStatList, Move, RequestUseSkill,
    ThrowItem,
};
use game_core::{
    CardinalDirection, CombatTables, ComponentKind, ComponentSnapshot, CycleReport, Entity,
    EntityId, EntityRef, EntitySnapshot, GameEnv, Line, MapDimensions, Position, SpatialIndex,
    TerrainKind, Tone, TurnScheduler,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::map::AreaMap;
use crate::message::MessageLog;

/// One player action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Step one tile; bumping into something opens or attacks it.
    Move(CardinalDirection),
    /// Throw the first carried item with this name at a tile.
    Throw { item: String, target: Position },
    /// Use the learned skill in this slot.
    UseSkill(usize),
    /// Pick up the first loose item on the player's tile.
    PickUp,
    Drop(String),
    /// Equip a carried item, returning any replaced one to the inventory.
    Equip(String),
    Wait,
}

/// What one command did.
#[derive(Clone, Debug, Default)]
pub struct TurnReport {
    /// False when the command could not be carried out; no cycle ran.
    pub spent: bool,
    pub cycle: Option<CycleReport>,
    /// Narration recorded while the command and its cycle ran.
    pub lines: Vec<Line>,
    pub player_alive: bool,
}

/// Serializable record of a whole level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub cycle: u64,
    pub dimensions: MapDimensions,
    /// Row-major terrain grid.
    pub terrain: Vec<TerrainKind>,
    pub player: Option<EntityId>,
    pub entities: Vec<EntitySnapshot>,
}

pub struct Session {
    config: RuntimeConfig,
    map: AreaMap,
    log: MessageLog,
    catalog: Catalog,
    tables: CombatTables,
    scheduler: TurnScheduler,
    player: Option<EntityRef>,
}

impl Session {
    /// A session over a walled, empty map sized by `config`.
    pub fn new(config: RuntimeConfig) -> Self {
        let dimensions = MapDimensions::new(config.map.width, config.map.height);
        Self::with_map(config, AreaMap::walled(dimensions))
    }

    pub fn with_map(config: RuntimeConfig, map: AreaMap) -> Self {
        let log = MessageLog::new(config.log_capacity).with_trace(config.narration_trace);
        let scheduler = TurnScheduler::new(&config.game);
        info!(
            target: "runtime::session",
            width = map.dimensions().width,
            height = map.dimensions().height,
            threshold = scheduler.threshold(),
            "session created"
        );
        Self {
            config,
            map,
            log,
            catalog: Catalog::standard(),
            tables: CombatTables::STANDARD,
            scheduler,
            player: None,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn map(&self) -> &AreaMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut AreaMap {
        &mut self.map
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Completed scheduling cycles.
    pub fn cycle(&self) -> u64 {
        self.scheduler.cycle()
    }

    /// The environment every rule runs against.
    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::with_all(&self.map, &self.catalog, &self.log, &self.tables)
    }

    /// Same as [`Session::env`] without narration, for level setup.
    fn quiet_env(&self) -> GameEnv<'_> {
        GameEnv::new(Some(&self.map), Some(&self.catalog), None, &self.tables)
    }

    // ------------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------------

    /// Instantiates `prototype` and places it on the map.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::SpawnBlocked` when the tile is not walkable.
    pub fn spawn(&self, prototype: Prototype, at: Position) -> Result<EntityRef> {
        let entity = self.catalog.spawn(prototype)?;
        self.place(entity, prototype, at)
    }

    /// Spawns the player with the reserved player id.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::SpawnBlocked` when the tile is not walkable.
    pub fn spawn_player(&mut self, at: Position) -> Result<EntityRef> {
        let player = self
            .catalog
            .instantiate_with_id(Prototype::Player.as_ref(), EntityId::PLAYER)?;
        let player = self.place(player, Prototype::Player, at)?;
        self.player = Some(player.clone());
        Ok(player)
    }

    fn place(&self, entity: EntityRef, prototype: Prototype, at: Position) -> Result<EntityRef> {
        if !self.map.spawn(entity.clone(), at) {
            return Err(RuntimeError::SpawnBlocked {
                prototype: prototype.to_string(),
                position: at,
            });
        }
        debug!(target: "runtime::session", entity = %entity.id(), %prototype, %at, "spawned");
        Ok(entity)
    }

    /// # Errors
    ///
    /// Returns `RuntimeError::MissingPlayer` before [`Session::spawn_player`].
    pub fn player(&self) -> Result<&EntityRef> {
        self.player.as_ref().ok_or(RuntimeError::MissingPlayer)
    }

    /// Puts a fresh `prototype` into `holder`'s inventory.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::ItemRefused` when the inventory is missing, full
    /// or cannot carry the item.
    pub fn give(&self, holder: &EntityRef, prototype: Prototype) -> Result<EntityRef> {
        let item = self.catalog.spawn(prototype)?;
        let env = self.quiet_env();
        let acquired = holder
            .emit(
                &env,
                AcquireItem {
                    item: Some(item.clone()),
                    acquired: false,
                },
            )
            .acquired;
        if !acquired {
            return Err(RuntimeError::ItemRefused {
                holder: holder.id(),
                item: prototype.to_string(),
            });
        }
        Ok(item)
    }

    /// Equips a fresh `prototype` on `holder`. A replaced item goes to the
    /// inventory, or to the floor when it does not fit.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::ItemRefused` when `holder` cannot wear the item.
    pub fn equip(&self, holder: &EntityRef, prototype: Prototype) -> Result<EntityRef> {
        let item = self.catalog.spawn(prototype)?;
        let env = self.quiet_env();
        if !wear(&env, holder, &item) {
            return Err(RuntimeError::ItemRefused {
                holder: holder.id(),
                item: prototype.to_string(),
            });
        }
        Ok(item)
    }

    /// Teaches a fresh `prototype` skill to `user`.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::MissingUnit` when `user` cannot hold skills.
    pub fn learn(&self, user: &EntityRef, prototype: Prototype) -> Result<EntityRef> {
        let skill = self.catalog.spawn(prototype)?;
        if !SkillUser::learn(&self.quiet_env(), user, skill.clone()) {
            return Err(RuntimeError::MissingUnit(user.id(), "skill user"));
        }
        Ok(skill)
    }

    /// Fills `chest` with `count` items drawn from the loot table.
    ///
    /// The draw is keyed on the chest id, so a level built the same way is
    /// stocked the same way.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::ItemRefused` once the chest is full.
    pub fn populate_chest(&self, chest: &EntityRef, count: usize) -> Result<Vec<EntityRef>> {
        let start = chest.id().0 as usize;
        (0..count)
            .map(|offset| self.give(chest, LOOT[(start + offset) % LOOT.len()]))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Turn loop
    // ------------------------------------------------------------------------

    /// Applies a player command and, when it spent the turn, runs one cycle.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::MissingPlayer` before [`Session::spawn_player`].
    pub fn command(&mut self, command: Command) -> Result<TurnReport> {
        let player = self.player()?.clone();
        if !self.is_alive(&player) {
            return Ok(TurnReport {
                lines: self.log.drain_new(),
                ..TurnReport::default()
            });
        }

        let spent = self.perform(&player, &command);
        debug!(target: "runtime::session", ?command, spent, "command applied");
        let cycle = spent.then(|| self.process_turns());

        Ok(TurnReport {
            spent,
            cycle,
            lines: self.log.drain_new(),
            player_alive: self.is_alive(&player),
        })
    }

    fn perform(&self, player: &EntityRef, command: &Command) -> bool {
        let env = self.env();
        match command {
            Command::Move(direction) => {
                let destination = player.position().step(*direction);
                let moved = player
                    .emit(
                        &env,
                        Move {
                            direction: Some(*direction),
                            moved: false,
                        },
                    )
                    .moved;
                // A bump into an occupant spends the turn; a wall does not.
                moved || self.map.can_occupy(destination)
            }
            Command::Throw { item, target } => player
                .emit(
                    &env,
                    ThrowItem {
                        item_name: item.clone(),
                        target: *target,
                        outcome: None,
                    },
                )
                .outcome
                .is_some(),
            Command::UseSkill(slot) => {
                player
                    .emit(
                        &env,
                        RequestUseSkill {
                            slot: *slot,
                            found: false,
                        },
                    )
                    .found
            }
            Command::PickUp => self.pick_up(&env, player),
            Command::Drop(item) => self.drop_item(&env, player, item),
            Command::Equip(item) => self.equip_carried(&env, player, item),
            Command::Wait => true,
        }
    }

    fn pick_up(&self, env: &GameEnv<'_>, player: &EntityRef) -> bool {
        self.map
            .entities_at(player.position())
            .iter()
            .filter(|loose| !Rc::ptr_eq(loose, player) && !loose.has(ComponentKind::Turn))
            .any(|loose| {
                player
                    .emit(
                        env,
                        AcquireItem {
                            item: Some(loose.clone()),
                            acquired: false,
                        },
                    )
                    .acquired
            })
    }

    fn drop_item(&self, env: &GameEnv<'_>, player: &EntityRef, item_name: &str) -> bool {
        let dropped = player
            .emit(
                env,
                DropItem {
                    item_name: item_name.to_string(),
                    dropped: None,
                },
            )
            .dropped;
        let Some(item) = dropped else {
            return false;
        };
        let line = Line::new()
            .tinted(Tone::Actor, screen_name(env, player))
            .plain(" drops ")
            .tinted(Tone::Item, screen_name(env, &item));
        env.narrate(line, Some(player));
        true
    }

    fn equip_carried(&self, env: &GameEnv<'_>, player: &EntityRef, item_name: &str) -> bool {
        let consumed = player
            .emit(
                env,
                ConsumeItem {
                    item_name: item_name.to_string(),
                    ..Default::default()
                },
            )
            .consumed;
        let Some(item) = consumed else {
            return false;
        };
        let quiet = self.quiet_env();
        if !wear(&quiet, player, &item) {
            stow(&quiet, player, item);
            return false;
        }
        let line = Line::new()
            .tinted(Tone::Actor, screen_name(env, player))
            .plain(" equips ")
            .tinted(Tone::Item, screen_name(env, &item));
        env.narrate(line, Some(player));
        true
    }

    /// Runs one scheduling cycle over every turn-capable entity on the map.
    pub fn process_turns(&mut self) -> CycleReport {
        let actors: Vec<EntityRef> = self
            .map
            .entities()
            .into_iter()
            .filter(|entity| entity.has(ComponentKind::Turn))
            .collect();
        let env = GameEnv::with_all(&self.map, &self.catalog, &self.log, &self.tables);
        self.scheduler
            .run_cycle(&env, self.player.as_ref(), &actors)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn is_alive(&self, entity: &EntityRef) -> bool {
        entity.emit(&self.env(), GetHealth::default()).current > 0
    }

    /// The player's stat lines.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::MissingPlayer` before [`Session::spawn_player`].
    pub fn player_stats(&self) -> Result<Vec<String>> {
        let player = self.player()?;
        Ok(player.emit(&self.env(), GetStatList::default()).stats)
    }

    /// Name and description of each learned skill, in slot order.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::MissingUnit` when the player cannot hold skills.
    pub fn skill_descriptions(&self) -> Result<Vec<(String, Line)>> {
        let player = self.player()?;
        let user = player
            .get::<SkillUser>()
            .ok_or(RuntimeError::MissingUnit(player.id(), "skill user"))?;
        let skills = user.state().skills().to_vec();
        let env = self.env();
        Ok(skills
            .iter()
            .map(|skill| (screen_name(&env, skill), Skill::describe(&env, skill)))
            .collect())
    }

    /// Entities the player can currently see, tile by tile.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::MissingPlayer` before [`Session::spawn_player`].
    pub fn visible_entities(&self) -> Result<Vec<EntityRef>> {
        let player = self.player()?;
        let env = self.env();
        Ok(self
            .map
            .entities()
            .into_iter()
            .filter(|entity| !Rc::ptr_eq(entity, player))
            .filter(|entity| can_see(&env, &self.map, player, entity.position()))
            .collect())
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            cycle: self.scheduler.cycle(),
            dimensions: self.map.dimensions(),
            terrain: self.map.terrain_grid().to_vec(),
            player: self.player.as_ref().map(|player| player.id()),
            entities: self
                .map
                .entities()
                .iter()
                .map(|entity| entity.snapshot())
                .collect(),
        }
    }

    /// # Errors
    ///
    /// Returns `RuntimeError::Snapshot` if encoding fails.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Rebuilds a session from a snapshot. Every entity is restored by
    /// re-attaching its units; the narration log starts empty.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::InvalidSnapshot` when the terrain grid does not
    /// match the dimensions or the recorded player is missing, and
    /// `RuntimeError::SpawnBlocked` when an entity sits on unwalkable terrain.
    pub fn restore(config: RuntimeConfig, snapshot: &WorldSnapshot) -> Result<Self> {
        let map = AreaMap::from_terrain(snapshot.dimensions, snapshot.terrain.clone())
            .ok_or(RuntimeError::InvalidSnapshot("terrain does not match dimensions"))?;
        let mut session = Self::with_map(config, map);
        session.scheduler = TurnScheduler::new(&session.config.game).resumed_at(snapshot.cycle);

        for record in &snapshot.entities {
            session.catalog.reserve_through(highest_id(record));
            let entity = Entity::restore(record);
            if !session.map.spawn(entity.clone(), record.position) {
                return Err(RuntimeError::SpawnBlocked {
                    prototype: record.name.clone(),
                    position: record.position,
                });
            }
            if snapshot.player == Some(entity.id()) {
                session.player = Some(entity);
            }
        }

        if snapshot.player.is_some() && session.player.is_none() {
            return Err(RuntimeError::InvalidSnapshot("player entity missing"));
        }
        info!(
            target: "runtime::session",
            cycle = snapshot.cycle,
            entities = snapshot.entities.len(),
            "session restored"
        );
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `RuntimeError::Snapshot` for malformed JSON, otherwise as
    /// [`Session::restore`].
    pub fn from_json(config: RuntimeConfig, json: &str) -> Result<Self> {
        let snapshot: WorldSnapshot = serde_json::from_str(json)?;
        Self::restore(config, &snapshot)
    }
}

/// Equips `item` on `holder`, stowing whatever it replaced.
fn wear(env: &GameEnv<'_>, holder: &EntityRef, item: &EntityRef) -> bool {
    let equipped = holder.emit(
        env,
        Equip {
            item: Some(item.clone()),
            ..Default::default()
        },
    );
    if let Some(replaced) = equipped.replaced {
        stow(env, holder, replaced);
    }
    equipped.was_equipped
}

/// Returns `item` to `holder`'s inventory, or drops it beside `holder`.
fn stow(env: &GameEnv<'_>, holder: &EntityRef, item: EntityRef) {
    let acquired = holder
        .emit(
            env,
            AcquireItem {
                item: Some(item.clone()),
                acquired: false,
            },
        )
        .acquired;
    if acquired {
        return;
    }
    if let Ok(map) = env.map() {
        let at = map
            .nearest_open(holder.position())
            .unwrap_or(holder.position());
        map.spawn(item, at);
    }
}

/// Largest id in `snapshot` and every entity it holds.
fn highest_id(snapshot: &EntitySnapshot) -> EntityId {
    snapshot
        .components
        .iter()
        .flat_map(held_entities)
        .map(highest_id)
        .fold(snapshot.id, cmp::max)
}

fn held_entities(component: &ComponentSnapshot) -> Vec<&EntitySnapshot> {
    match component {
        ComponentSnapshot::Inventory { items, .. } => items.iter().collect(),
        ComponentSnapshot::Equipment { weapon, armor } => {
            weapon.iter().chain(armor.iter()).collect()
        }
        ComponentSnapshot::SkillUser { skills, .. } => skills.iter().collect(),
        _ => Vec::new(),
    }
}
