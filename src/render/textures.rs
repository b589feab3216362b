use image::RgbaImage;
use wgpu::*;

use crate::error::{SceneError, SceneResult};
use crate::render::types::WgpuTexture;
use crate::resource_path::{find_skybox_face, SKYBOX_FACES};

fn create_sampler(device: &Device, address_mode: AddressMode) -> Sampler {
    device.create_sampler(&SamplerDescriptor {
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: FilterMode::Linear,
        min_filter: FilterMode::Linear,
        mipmap_filter: FilterMode::Linear,
        ..Default::default()
    })
}

pub fn create_rgba_texture(
    device: &Device,
    queue: &Queue,
    label: &str,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> WgpuTexture {
    let size = Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8UnormSrgb,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: Origin3d::ZERO,
            aspect: TextureAspect::All,
        },
        pixels,
        ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&TextureViewDescriptor::default());
    let sampler = create_sampler(device, AddressMode::Repeat);

    WgpuTexture { texture, view, sampler }
}

/// 1x1 white, bound for primitives without a base color texture.
pub fn create_white_texture(device: &Device, queue: &Queue) -> WgpuTexture {
    create_rgba_texture(device, queue, "White Texture", 1, 1, &[255, 255, 255, 255])
}

/// Checks the six faces are square and equally sized, then packs them
/// layer after layer in upload order.
pub fn stack_cube_faces(faces: &[(&str, RgbaImage)]) -> SceneResult<(u32, Vec<u8>)> {
    let Some((_, first)) = faces.first() else {
        return Err(SceneError::MissingAsset("cube map faces".to_string()));
    };
    let expected = first.width();

    let mut pixels = Vec::with_capacity((expected * expected * 4) as usize * faces.len());
    for (face, image) in faces {
        if image.width() != expected || image.height() != expected {
            return Err(SceneError::CubeFaceSize {
                face: face.to_string(),
                width: image.width(),
                height: image.height(),
                expected,
            });
        }
        pixels.extend_from_slice(image.as_raw());
    }

    Ok((expected, pixels))
}

/// Loads `px nx py ny pz nz` `.jpg` faces from `skybox_dir` into a cube texture.
pub fn load_cube_texture(device: &Device, queue: &Queue, skybox_dir: &str) -> SceneResult<WgpuTexture> {
    let mut faces = Vec::with_capacity(SKYBOX_FACES.len());
    for face in SKYBOX_FACES {
        let path = find_skybox_face(skybox_dir, face)
            .ok_or_else(|| SceneError::MissingAsset(format!("{}/{}.jpg", skybox_dir, face)))?;
        let image = image::open(&path)?.to_rgba8();
        faces.push((face, image));
    }
    let (edge, pixels) = stack_cube_faces(&faces)?;

    let size = Extent3d {
        width: edge,
        height: edge,
        depth_or_array_layers: 6,
    };
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("Skybox Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8UnormSrgb,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: Origin3d::ZERO,
            aspect: TextureAspect::All,
        },
        &pixels,
        ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * edge),
            rows_per_image: Some(edge),
        },
        size,
    );

    let view = texture.create_view(&TextureViewDescriptor {
        label: Some("Skybox View"),
        dimension: Some(TextureViewDimension::Cube),
        ..Default::default()
    });
    let sampler = create_sampler(device, AddressMode::ClampToEdge);

    log::info!("Loaded {}x{} skybox from {}/", edge, edge, skybox_dir);
    Ok(WgpuTexture { texture, view, sampler })
}
