pub const WORLD_SIZE: usize = 256;
pub const CHUNK_SIZE: usize = 16;
pub const CHUNKS_PER_SIDE: usize = WORLD_SIZE / CHUNK_SIZE;
pub const BUILDING_LAYERS: usize = 5;
/// Pending origins are kept within this many cells of the world on each side.
pub const PLACEMENT_MARGIN: i32 = WORLD_SIZE as i32;

/// Horizontal distance in pixels between the screen origins of two cells that
/// differ by one step along a single axis.
pub const ISOMETRIC_HALF_WIDTH: f32 = 64.0;
/// Vertical counterpart of [`ISOMETRIC_HALF_WIDTH`].
pub const ISOMETRIC_HALF_HEIGHT: f32 = 32.0;
/// Pixel height of one building layer.
pub const LAYER_HEIGHT: f32 = 79.0;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.5;
/// Mouse-wheel units that change the zoom by one step at scale 1.
pub const WHEEL_ZOOM_DIVISOR: f32 = 480.0;

pub const DEFAULT_SCREEN_WIDTH: f32 = 1280.0;
pub const DEFAULT_SCREEN_HEIGHT: f32 = 720.0;

/// Group assigned to building types that do not name one.
pub const DEFAULT_GROUP: &str = "default";
/// Proximity radius given to [`DEFAULT_GROUP`] when the catalog omits it.
pub const DEFAULT_GROUP_DISTANCE: u32 = 5;
/// Ground assigned to every cell when the catalog lists no grounds.
pub const DEFAULT_GROUND: &str = "grass";
