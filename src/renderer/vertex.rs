//! Vertex format and faction palette

use bytemuck::{Pod, Zeroable};

/// Playfield-space position with a flat RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `VertexInput` in shader.wgsl
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for factions and overlays
pub mod colors {
    use crate::sim::Faction;

    /// 0xRRGGBB to RGBA floats (written as-is to a non-sRGB surface)
    const fn hex(rgb: u32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            1.0,
        ]
    }

    pub const WEI_TERRITORY: [f32; 4] = hex(0x8899DD);
    pub const WEI_BALL: [f32; 4] = hex(0x6677CC);
    pub const SHU_TERRITORY: [f32; 4] = hex(0xDD8888);
    pub const SHU_BALL: [f32; 4] = hex(0xCC6666);
    pub const WU_TERRITORY: [f32; 4] = hex(0x88DD88);
    pub const WU_BALL: [f32; 4] = hex(0x66CC66);
    pub const BALL_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = hex(0x172B36);

    pub fn territory(faction: Faction) -> [f32; 4] {
        match faction {
            Faction::Wei => WEI_TERRITORY,
            Faction::Shu => SHU_TERRITORY,
            Faction::Wu => WU_TERRITORY,
        }
    }

    pub fn ball(faction: Faction) -> [f32; 4] {
        match faction {
            Faction::Wei => WEI_BALL,
            Faction::Shu => SHU_BALL,
            Faction::Wu => WU_BALL,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_hex_channels() {
            assert_eq!(hex(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
            assert_eq!(hex(0x000000), [0.0, 0.0, 0.0, 1.0]);
        }

        #[test]
        fn test_ball_darker_than_territory() {
            for f in Faction::ALL {
                let t: f32 = territory(f)[..3].iter().sum();
                let b: f32 = ball(f)[..3].iter().sum();
                assert!(b < t);
            }
        }
    }
}
