use crate::coin::CoinPart;

/// Gold rim color, 0xFFD700.
pub const GOLD: [f32; 3] = [1.0, 215.0 / 255.0, 0.0];

#[derive(Debug, Clone, PartialEq)]
pub struct CoinMaterial {
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    /// Samples the face texture of this part instead of plain white.
    pub textured: bool,
    pub double_sided: bool,
}

impl CoinMaterial {
    pub fn for_part(part: CoinPart) -> Self {
        match part {
            CoinPart::Rim => Self {
                base_color: GOLD,
                metalness: 0.8,
                roughness: 0.8,
                textured: false,
                double_sided: false,
            },
            CoinPart::Heads | CoinPart::Tails => Self {
                base_color: [1.0, 1.0, 1.0],
                metalness: 0.8,
                roughness: 0.8,
                textured: true,
                double_sided: true,
            },
        }
    }

    pub fn uniform(&self) -> MaterialUniform {
        let [r, g, b] = self.base_color.map(srgb_to_linear);
        MaterialUniform {
            base_color: [r, g, b, 1.0],
            params: [
                self.metalness,
                self.roughness,
                if self.double_sided { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Colors are authored in sRGB; lighting runs in linear space.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Material uniform buffer data, laid out for WGSL.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    /// metalness, roughness, double sided, unused
    pub params: [f32; 4],
}
