use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown render mode: {0:?}")]
pub struct ParseRenderModeError(pub String);

/// How a renderer should present a mesh.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Point cloud
    Point,
    Wireframe,
    /// Solid, lit per face
    #[default]
    Flat,
    /// Solid, lit per vertex and interpolated
    Smooth,
    /// Textured, unlit
    Texture,
    /// Textured, lit per face
    TextureFlat,
    /// Textured, lit per vertex and interpolated
    TextureSmooth,
}

impl RenderMode {
    pub const ALL: [Self; 7] = [
        Self::Point,
        Self::Wireframe,
        Self::Flat,
        Self::Smooth,
        Self::Texture,
        Self::TextureFlat,
        Self::TextureSmooth,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Wireframe => "wireframe",
            Self::Flat => "flat",
            Self::Smooth => "smooth",
            Self::Texture => "texture",
            Self::TextureFlat => "textureflat",
            Self::TextureSmooth => "texturesmooth",
        }
    }

    #[inline]
    pub const fn is_textured(self) -> bool {
        matches!(
            self,
            Self::Texture | Self::TextureFlat | Self::TextureSmooth
        )
    }

    #[inline]
    pub const fn uses_face_normals(self) -> bool {
        matches!(self, Self::Flat | Self::TextureFlat)
    }

    #[inline]
    pub const fn uses_vertex_normals(self) -> bool {
        matches!(self, Self::Smooth | Self::TextureSmooth)
    }
}

impl Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderMode {
    type Err = ParseRenderModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ParseRenderModeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for mode in RenderMode::ALL {
            assert_eq!(mode.to_string().parse::<RenderMode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "gouraud".parse::<RenderMode>(),
            Err(ParseRenderModeError("gouraud".to_owned()))
        );
    }

    #[test]
    fn normal_usage() {
        assert!(RenderMode::TextureSmooth.uses_vertex_normals());
        assert!(RenderMode::TextureSmooth.is_textured());
        assert!(RenderMode::default().uses_face_normals());
        assert!(!RenderMode::Wireframe.uses_face_normals());
    }
}
