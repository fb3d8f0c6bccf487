#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    path::PathBuf,
    rc::Rc,
};

use agent_ngin::{
    ModelKind,
    audio::{PlaybackEngine, PlaybackInstance},
    data_structures::model::{Mesh, Model},
    render::{DrawCall, Renderer},
    resources::{AssetLoader, SoundBuffer},
};
use cgmath::Matrix4;

/// Shared, ordered record of everything the fakes observed.
pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// In-memory asset store that counts loads per key.
pub(crate) struct CountingLoader {
    files: HashMap<PathBuf, Vec<u8>>,
    corrupt: HashSet<PathBuf>,
    loads: HashMap<PathBuf, u32>,
    journal: Journal,
}

impl CountingLoader {
    pub fn new(journal: &Journal) -> Self {
        Self {
            files: HashMap::new(),
            corrupt: HashSet::new(),
            loads: HashMap::new(),
            journal: Rc::clone(journal),
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.add_file(path);
        self
    }

    pub fn with_corrupt_file(mut self, path: &str) -> Self {
        self.add_file(path);
        self.corrupt.insert(PathBuf::from(path));
        self
    }

    pub fn add_file(&mut self, path: &str) {
        self.files
            .insert(PathBuf::from(path), path.as_bytes().to_vec());
    }

    pub fn loads(&self, path: &str) -> u32 {
        self.loads.get(&PathBuf::from(path)).copied().unwrap_or(0)
    }

    pub fn total_loads(&self) -> u32 {
        self.loads.values().sum()
    }
}

impl AssetLoader<PathBuf> for CountingLoader {
    type Resource = SoundBuffer;

    fn exists(&self, key: &PathBuf) -> bool {
        self.files.contains_key(key)
    }

    fn load(&mut self, key: &PathBuf) -> anyhow::Result<SoundBuffer> {
        *self.loads.entry(key.clone()).or_default() += 1;
        if self.corrupt.contains(key) {
            anyhow::bail!("unsupported encoding");
        }
        let bytes = self
            .files
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("vanished"))?;
        Ok(SoundBuffer::new(key.clone(), bytes))
    }
}

impl Drop for CountingLoader {
    fn drop(&mut self) {
        self.journal.borrow_mut().push("drop loader".to_string());
    }
}

/// Loader for the model registry: every `.model` path exists.
#[derive(Default)]
pub(crate) struct ModelFiles {
    pub loads: Vec<PathBuf>,
}

impl AssetLoader<PathBuf> for ModelFiles {
    type Resource = Model;

    fn exists(&self, key: &PathBuf) -> bool {
        key.extension().is_some_and(|ext| ext == "model")
    }

    fn load(&mut self, key: &PathBuf) -> anyhow::Result<Model> {
        self.loads.push(key.clone());
        Ok(Model {
            name: key.display().to_string(),
            meshes: vec![Mesh {
                name: "quad".to_string(),
                positions: vec![[0.0; 3]; 4],
                indices: vec![0, 1, 2, 2, 3, 0],
            }],
        })
    }
}

/// Playback engine that writes every call into a journal.
pub(crate) struct RecordingEngine {
    journal: Journal,
    pub created: u32,
    pub volume: f32,
}

impl RecordingEngine {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            created: 0,
            volume: -1.0,
        }
    }
}

impl PlaybackEngine for RecordingEngine {
    type Instance = RecordingInstance;

    fn create_instance(&mut self, buffer: &SoundBuffer) -> anyhow::Result<RecordingInstance> {
        self.created += 1;
        let name = buffer.path.display().to_string();
        self.journal.borrow_mut().push(format!("create {name}"));
        Ok(RecordingInstance {
            name,
            journal: Rc::clone(&self.journal),
        })
    }

    fn play_one_shot(&mut self, buffer: &SoundBuffer) -> anyhow::Result<()> {
        self.journal
            .borrow_mut()
            .push(format!("one-shot {}", buffer.path.display()));
        Ok(())
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn update(&mut self) {
        self.journal.borrow_mut().push("update".to_string());
    }
}

impl Drop for RecordingEngine {
    fn drop(&mut self) {
        self.journal.borrow_mut().push("drop engine".to_string());
    }
}

pub(crate) struct RecordingInstance {
    name: String,
    journal: Journal,
}

impl RecordingInstance {
    fn record(&self, action: &str) {
        self.journal
            .borrow_mut()
            .push(format!("{action} {}", self.name));
    }
}

impl PlaybackInstance for RecordingInstance {
    fn play(&mut self, looped: bool) {
        self.record(if looped { "play-loop" } else { "play" });
    }

    fn pause(&mut self) {
        self.record("pause");
    }

    fn resume(&mut self) {
        self.record("resume");
    }

    fn stop(&mut self) {
        self.record("stop");
    }
}

impl Drop for RecordingInstance {
    fn drop(&mut self) {
        self.record("drop instance");
    }
}

/// What a renderer was asked to draw.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Drawn {
    pub kind: ModelKind,
    pub model: String,
    pub world: Matrix4<f32>,
    pub view_projection: Matrix4<f32>,
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub drawn: Vec<Drawn>,
}

impl Renderer<Model> for RecordingRenderer {
    fn draw(&mut self, call: DrawCall<'_, Model>) -> anyhow::Result<()> {
        self.drawn.push(Drawn {
            kind: call.kind,
            model: call.model.name.clone(),
            world: call.world,
            view_projection: call.view_projection(),
        });
        Ok(())
    }
}

pub(crate) fn assert_matrix_eq(actual: &Matrix4<f32>, expected: &Matrix4<f32>) {
    let a: &[f32; 16] = actual.as_ref();
    let e: &[f32; 16] = expected.as_ref();
    for (x, y) in a.iter().zip(e) {
        assert!((x - y).abs() < 1e-5, "{actual:?} != {expected:?}");
    }
}
