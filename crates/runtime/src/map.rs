//! Terrain plus the per-tile entity index of one level.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use game_core::{EntityRef, MapDimensions, Position, SpatialIndex, TerrainKind, Vec2};
use tracing::trace;

/// Grid of terrain with the entities standing on each tile.
///
/// Entities on one tile keep their spawn order. Terrain is fixed once the
/// session starts; doors and other blockers are entities, not terrain.
pub struct AreaMap {
    dimensions: MapDimensions,
    terrain: Vec<TerrainKind>,
    tiles: RefCell<BTreeMap<Position, Vec<EntityRef>>>,
}

impl AreaMap {
    /// A map of open floor.
    pub fn new(dimensions: MapDimensions) -> Self {
        let area = dimensions.width as usize * dimensions.height as usize;
        Self {
            dimensions,
            terrain: vec![TerrainKind::Floor; area],
            tiles: RefCell::new(BTreeMap::new()),
        }
    }

    /// Rebuilds a map from a row-major terrain grid. Returns `None` when the
    /// grid does not match `dimensions`.
    pub fn from_terrain(dimensions: MapDimensions, terrain: Vec<TerrainKind>) -> Option<Self> {
        let area = dimensions.width as usize * dimensions.height as usize;
        (terrain.len() == area).then(|| Self {
            dimensions,
            terrain,
            tiles: RefCell::new(BTreeMap::new()),
        })
    }

    /// Open floor enclosed by a one-tile wall.
    pub fn walled(dimensions: MapDimensions) -> Self {
        let mut map = Self::new(dimensions);
        let (width, height) = (dimensions.width as i32, dimensions.height as i32);
        for x in 0..width {
            map.set_terrain(Position::new(x, 0), TerrainKind::Wall);
            map.set_terrain(Position::new(x, height - 1), TerrainKind::Wall);
        }
        for y in 0..height {
            map.set_terrain(Position::new(0, y), TerrainKind::Wall);
            map.set_terrain(Position::new(width - 1, y), TerrainKind::Wall);
        }
        map
    }

    /// Returns false when `position` is outside the map.
    pub fn set_terrain(&mut self, position: Position, kind: TerrainKind) -> bool {
        match self.offset(position) {
            Some(offset) => {
                self.terrain[offset] = kind;
                true
            }
            None => false,
        }
    }

    /// Terrain at `position`; everything outside the map is void.
    pub fn terrain(&self, position: Position) -> TerrainKind {
        self.offset(position)
            .map_or(TerrainKind::Void, |offset| self.terrain[offset])
    }

    /// Row-major terrain grid.
    pub fn terrain_grid(&self) -> &[TerrainKind] {
        &self.terrain
    }

    /// Every indexed entity, tile by tile.
    pub fn entities(&self) -> Vec<EntityRef> {
        self.tiles.borrow().values().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tiles.borrow().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_indexed(&self, entity: &EntityRef) -> bool {
        self.tiles
            .borrow()
            .get(&entity.position())
            .is_some_and(|occupants| occupants.iter().any(|o| Rc::ptr_eq(o, entity)))
    }

    fn offset(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    fn remove(&self, entity: &EntityRef) -> bool {
        let mut tiles = self.tiles.borrow_mut();
        let at = entity.position();
        let Some(occupants) = tiles.get_mut(&at) else {
            return false;
        };
        let before = occupants.len();
        occupants.retain(|occupant| !Rc::ptr_eq(occupant, entity));
        let removed = occupants.len() != before;
        if occupants.is_empty() {
            tiles.remove(&at);
        }
        removed
    }
}

impl SpatialIndex for AreaMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn entities_at(&self, position: Position) -> Vec<EntityRef> {
        self.tiles
            .borrow()
            .get(&position)
            .cloned()
            .unwrap_or_default()
    }

    fn entities_within(&self, center: Position, radius: f32) -> Vec<EntityRef> {
        self.tiles
            .borrow()
            .iter()
            .filter(|(tile, _)| Vec2::from(**tile - center).magnitude() <= radius)
            .flat_map(|(_, occupants)| occupants.iter().cloned())
            .collect()
    }

    fn can_occupy(&self, position: Position) -> bool {
        self.terrain(position).is_passable()
    }

    fn move_entity(&self, entity: &EntityRef, to: Position) -> bool {
        if !self.can_occupy(to) || !self.remove(entity) {
            return false;
        }
        let from = entity.position();
        entity.set_position(to);
        self.tiles
            .borrow_mut()
            .entry(to)
            .or_default()
            .push(entity.clone());
        trace!(target: "runtime::map", entity = %entity.id(), %from, %to, "moved");
        true
    }

    fn spawn(&self, entity: EntityRef, at: Position) -> bool {
        if !self.can_occupy(at) || self.is_indexed(&entity) {
            return false;
        }
        entity.set_position(at);
        trace!(target: "runtime::map", entity = %entity.id(), %at, "spawned");
        self.tiles.borrow_mut().entry(at).or_default().push(entity);
        true
    }

    fn despawn(&self, entity: &EntityRef) -> bool {
        let removed = self.remove(entity);
        if removed {
            trace!(target: "runtime::map", entity = %entity.id(), "despawned");
        }
        removed
    }

    fn nearest_open(&self, around: Position) -> Option<Position> {
        if self.can_occupy(around) {
            return Some(around);
        }
        let reach = self.dimensions.width.max(self.dimensions.height) as i32;
        (1..=reach).find_map(|ring| {
            (-ring..=ring)
                .flat_map(|dy| (-ring..=ring).map(move |dx| Position::new(dx, dy)))
                .filter(|offset| offset.x.abs() == ring || offset.y.abs() == ring)
                .map(|offset| around + offset)
                .find(|tile| self.can_occupy(*tile))
        })
    }

    /// Walls and the void beyond the map stop sight; water does not.
    fn is_opaque(&self, position: Position) -> bool {
        matches!(
            self.terrain(position),
            TerrainKind::Wall | TerrainKind::Void
        )
    }
}
