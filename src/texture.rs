// texture.rs - Image decoding and GPU upload for poster textures
use anyhow::{bail, Context, Result};
use image::RgbaImage;
use std::path::Path;

pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Decode an image file to RGBA8
pub fn load_rgba(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    decode_rgba(&bytes).with_context(|| format!("Failed to decode image {}", path.display()))
}

pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes).context("Failed to decode image bytes")?;
    Ok(image.to_rgba8())
}

/// Both sides must be non-zero and no larger than the device's 2D texture limit
pub fn check_dimensions(width: u32, height: u32, max: u32) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("image is empty ({}x{})", width, height);
    }
    if width > max || height > max {
        bail!("image {}x{} exceeds the texture limit of {}", width, height, max);
    }
    Ok(())
}

/// Load and check against `max` before anything is uploaded
pub fn load_within(path: impl AsRef<Path>, max: u32) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = load_rgba(path)?;
    check_dimensions(image.width(), image.height(), max)
        .with_context(|| format!("Cannot upload {}", path.display()))?;
    Ok(image)
}

/// Sampled texture with its view and sampler
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// 1x1 white texture; sampling it leaves the material color unchanged
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let pixel = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        Self::from_image(device, queue, &pixel, "White Texture")
    }

    /// Load from disk, falling back to white when the file is missing, unreadable or too large
    pub fn load_or_white(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Self {
        let max = device.limits().max_texture_dimension_2d;
        match load_within(path, max) {
            Ok(image) => {
                log::info!(
                    "Loaded texture {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                Self::from_image(device, queue, &image, &path.display().to_string())
            }
            Err(e) => {
                log::warn!("Failed to load poster texture {}: {:#}", path.display(), e);
                Self::white(device, queue)
            }
        }
    }

    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    #[test]
    fn test_missing_file_names_path() {
        let err = load_rgba("no/such/poster.png").unwrap_err();
        assert!(format!("{:#}", err).contains("no/such/poster.png"));
    }

    #[test]
    fn test_decode_png_bytes() {
        let mut source = RgbaImage::new(2, 3);
        source.put_pixel(1, 2, Rgba([10, 20, 30, 255]));

        let mut bytes = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let decoded = decode_rgba(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (2, 3));
        assert_eq!(decoded.get_pixel(1, 2), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_dimension_limits() {
        assert!(check_dimensions(256, 192, 8192).is_ok());
        assert!(check_dimensions(8192, 8192, 8192).is_ok());

        let err = check_dimensions(16384, 4, 8192).unwrap_err();
        assert!(err.to_string().contains("exceeds the texture limit"));
        assert!(check_dimensions(4, 8193, 8192).is_err());
        assert!(check_dimensions(0, 4, 8192).is_err());
    }

    #[test]
    fn test_stock_poster_fits_default_limit() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/textures/poster.png");
        let image = load_within(path, wgpu::Limits::downlevel_defaults().max_texture_dimension_2d).unwrap();
        assert_eq!(image.dimensions(), (256, 192));

        let err = load_within(path, 128).unwrap_err();
        assert!(format!("{:#}", err).contains("poster.png"));
    }

    #[test]
    fn test_garbage_bytes_fail() {
        assert!(decode_rgba(b"not an image").is_err());
    }
}
