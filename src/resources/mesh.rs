use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use crate::{
    config::AssetConfig,
    data_structures::model::{Mesh, Model},
    resources::{
        AssetLoader,
        fs::{load_binary, load_string, resolve},
    },
};

/**
 * Loads CPU-side geometry from `.obj` (via tobj) and `.gltf` / `.glb` (via gltf)
 * files below the asset root. Materials and textures are ignored: the renderer
 * owns everything that ends up on the GPU.
 */
#[derive(Clone, Debug, Default)]
pub struct ModelLoader {
    config: AssetConfig,
}

impl ModelLoader {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }
}

impl AssetLoader<PathBuf> for ModelLoader {
    type Resource = Model;

    fn exists(&self, key: &PathBuf) -> bool {
        resolve(&self.config, key).is_file()
    }

    fn load(&mut self, key: &PathBuf) -> anyhow::Result<Model> {
        let extension = key
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("obj") => load_model_obj(&self.config, key),
            Some("gltf") | Some("glb") => load_model_gltf(&self.config, key),
            _ => anyhow::bail!("unsupported model format: {}", key.display()),
        }
    }
}

fn model_name(file_name: &Path) -> String {
    file_name
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.display().to_string())
}

pub fn load_model_obj(config: &AssetConfig, file_name: &Path) -> anyhow::Result<Model> {
    let obj_text = load_string(config, file_name)?;
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));

    let (models, materials) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| match load_string(config, p) {
            Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
            Err(_) => Err(tobj::LoadError::OpenFileFailed),
        },
    )?;
    if let Err(e) = materials {
        log::debug!("{} has no usable materials: {}", file_name.display(), e);
    }

    let meshes = models
        .into_iter()
        .enumerate()
        .filter_map(|(idx, m)| {
            let positions: Vec<[f32; 3]> = m
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            if m.mesh.indices.iter().any(|&i| i as usize >= positions.len()) {
                log::warn!(
                    "Mesh at index {} in file {} references vertices that do not exist and was skipped.",
                    idx,
                    file_name.display()
                );
                return None;
            }
            Some(Mesh {
                name: m.name,
                positions,
                indices: m.mesh.indices,
            })
        })
        .collect();

    Ok(Model {
        name: model_name(file_name),
        meshes,
    })
}

pub fn load_model_gltf(config: &AssetConfig, file_name: &Path) -> anyhow::Result<Model> {
    let bytes = load_binary(config, file_name)?;
    let gltf = gltf::Gltf::from_slice(&bytes)?;
    let base = resolve(config, file_name);
    let buffers = gltf::import_buffers(&gltf.document, base.parent(), gltf.blob.clone())?;

    let mut meshes = Vec::new();
    for mesh in gltf.document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &**data));

            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(positions) => positions.collect(),
                None => {
                    log::warn!(
                        "Primitive {} of mesh {:?} in {} has no positions and was skipped.",
                        primitive.index(),
                        mesh.name(),
                        file_name.display()
                    );
                    continue;
                }
            };
            let indices = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            meshes.push(Mesh {
                name: mesh.name().unwrap_or("unknown_mesh").to_string(),
                positions,
                indices,
            });
        }
    }

    Ok(Model {
        name: model_name(file_name),
        meshes,
    })
}
