use crate::color::Color3;
use crate::text::TextTexture;

/// 拡散テクスチャの参照先
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// 外部画像（読み込みはホスト側）
    Url(String),
    /// 生成済みの文字テクスチャ
    Text(TextTexture),
}

impl TextureSource {
    pub fn url(url: impl Into<String>) -> Self {
        TextureSource::Url(url.into())
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, TextureSource::Text(tex) if tex.has_alpha)
    }
}

/// 標準マテリアル
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub name: String,
    pub diffuse_color: Color3,
    pub diffuse_texture: Option<TextureSource>,
    pub specular_color: Color3,
    pub back_face_culling: bool,
}

impl StandardMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse_color: Color3::WHITE,
            diffuse_texture: None,
            specular_color: Color3::WHITE,
            back_face_culling: true,
        }
    }

    pub fn with_diffuse_color(mut self, color: Color3) -> Self {
        self.diffuse_color = color;
        self
    }

    pub fn with_texture(mut self, texture: TextureSource) -> Self {
        self.diffuse_texture = Some(texture);
        self
    }

    /// 文字ラベル用: 鏡面反射なし、両面描画
    pub fn text_plane(texture: TextTexture) -> Self {
        Self {
            specular_color: Color3::BLACK,
            back_face_culling: false,
            ..Self::new("TextPlaneMaterial").with_texture(TextureSource::Text(texture))
        }
    }
}
