#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x_index: u32,
    pub y_index: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    #[must_use]
    pub fn new(x_index: u32, y_index: u32, width: u32, height: u32) -> Self {
        Self {
            x_index,
            y_index,
            x_offset: x_index * width,
            y_offset: y_index * height,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_follow_indices() {
        let tile = Tile::new(3, 5, 60, 52);

        assert_eq!(tile.x_offset, 180);
        assert_eq!(tile.y_offset, 260);
        assert_eq!(tile.width, 60);
        assert_eq!(tile.height, 52);
    }
}
