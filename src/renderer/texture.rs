//! Sprite textures
//!
//! Images are decoded with the `image` crate and uploaded once at startup.
//! A sprite that fails to load is logged and simply not drawn.

use std::path::Path;

use crate::error::AssetError;

/// Sprites used by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Passenger,
    Sick,
    Belt,
    Cart,
    Info,
}

impl TextureId {
    pub const ALL: [TextureId; 5] = [
        TextureId::Passenger,
        TextureId::Sick,
        TextureId::Belt,
        TextureId::Cart,
        TextureId::Info,
    ];

    /// Image file name inside the resource directory
    pub fn file_name(&self) -> &'static str {
        match self {
            TextureId::Passenger => "passenger.png",
            TextureId::Sick => "sick.png",
            TextureId::Belt => "belt.png",
            TextureId::Cart => "cart.png",
            TextureId::Info => "info.png",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Decode an image file into RGBA8 pixels
pub fn load_rgba(path: &Path) -> Result<image::RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// A sprite uploaded to the GPU, ready to bind
pub struct GpuTexture {
    pub size: (u32, u32),
    pub bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Upload RGBA8 pixels and build the bind group for the textured pipeline
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: &str,
        image: &image::RgbaImage,
    ) -> Self {
        let (width, height) = image.dimensions();
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            size: (width, height),
            bind_group,
        }
    }
}

/// All scene sprites; missing ones stay `None`
#[derive(Default)]
pub struct TextureSet {
    slots: [Option<GpuTexture>; TextureId::ALL.len()],
}

impl TextureSet {
    /// Load every sprite from `dir`, logging the ones that fail
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        dir: &Path,
    ) -> Self {
        let mut set = Self::default();
        for id in TextureId::ALL {
            let path = dir.join(id.file_name());
            match load_rgba(&path) {
                Ok(image) => {
                    let texture =
                        GpuTexture::upload(device, queue, layout, sampler, id.file_name(), &image);
                    log::info!(
                        "Loaded texture {} ({}x{})",
                        path.display(),
                        texture.size.0,
                        texture.size.1
                    );
                    set.slots[id.index()] = Some(texture);
                }
                Err(e) => log::warn!("Texture skipped: {}", e),
            }
        }
        set
    }

    pub fn get(&self, id: TextureId) -> Option<&GpuTexture> {
        self.slots[id.index()].as_ref()
    }

    /// Number of sprites that loaded
    pub fn loaded(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_unique() {
        let mut names: Vec<_> = TextureId::ALL.iter().map(|id| id.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TextureId::ALL.len());
    }

    #[test]
    fn test_index_matches_order() {
        for (i, id) in TextureId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_missing_image_reports_not_found() {
        let err = load_rgba(Path::new("no/such/dir/cart.png")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert!(err.to_string().contains("cart.png"));
    }

    #[test]
    fn test_undecodable_image_reports_decode_error() {
        let path = std::env::temp_dir().join("coaster_ride_not_a_png.png");
        std::fs::write(&path, b"definitely not png data").unwrap();
        let err = load_rgba(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_round_trip_png() {
        let path = std::env::temp_dir().join("coaster_ride_tiny.png");
        let mut img = image::RgbaImage::new(2, 3);
        img.put_pixel(1, 2, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.dimensions(), (2, 3));
        assert_eq!(loaded.get_pixel(1, 2).0, [10, 20, 30, 255]);
        let _ = std::fs::remove_file(&path);
    }
}
