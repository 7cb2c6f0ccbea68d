//! Named, tagged uniform values.

/// Name of the elapsed time scalar every mounted table carries.
pub const TIME: &str = "u_time";
/// Name of the resolution vector every mounted table carries.
pub const RESOLUTION: &str = "u_resolution";

/// A uniform value. The variant is fixed when the value is built.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Scalar(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec3List(Vec<[f32; 3]>),
    FloatList(Vec<f32>),
}

impl UniformValue {
    pub fn shape(&self) -> UniformShape {
        match self {
            Self::Scalar(_) => UniformShape::Scalar,
            Self::Vec2(_) => UniformShape::Vec2,
            Self::Vec3(_) => UniformShape::Vec3,
            Self::Vec3List(v) => UniformShape::Vec3List(v.len()),
            Self::FloatList(v) => UniformShape::FloatList(v.len()),
        }
    }
}

/// Shape of a uniform without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformShape {
    Scalar,
    Vec2,
    Vec3,
    Vec3List(usize),
    FloatList(usize),
}

/// Ordered names and shapes of a table.
///
/// Two tables with equal layouts can share a compiled pipeline; only their
/// buffer contents differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UniformLayout(pub Vec<(String, UniformShape)>);

/// Insertion-ordered uniform table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UniformTable {
    entries: Vec<(String, UniformValue)>,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a uniform. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: UniformValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`UniformTable::insert`].
    pub fn with(mut self, name: impl Into<String>, value: UniformValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a uniform by name.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Mutable lookup. Changing the shape of the value changes the layout.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut UniformValue> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Overwrite an existing scalar. Returns false if `name` is missing or not a scalar.
    pub fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        match self.get_mut(name) {
            Some(UniformValue::Scalar(v)) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// Overwrite an existing vec2. Returns false if `name` is missing or not a vec2.
    pub fn set_vec2(&mut self, name: &str, value: [f32; 2]) -> bool {
        match self.get_mut(name) {
            Some(UniformValue::Vec2(v)) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// The value of `name` if it holds a scalar.
    pub fn scalar(&self, name: &str) -> Option<f32> {
        match self.get(name) {
            Some(UniformValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    /// The value of `name` if it holds a vec2.
    pub fn vec2(&self, name: &str) -> Option<[f32; 2]> {
        match self.get(name) {
            Some(UniformValue::Vec2(v)) => Some(*v),
            _ => None,
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of uniforms, empty lists included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names and shapes in insertion order. Two tables with equal layouts share a pipeline.
    pub fn layout(&self) -> UniformLayout {
        UniformLayout(
            self.entries
                .iter()
                .map(|(n, v)| (n.clone(), v.shape()))
                .collect(),
        )
    }

    /// Copy of this table with the frame-managed entries added.
    ///
    /// `u_time` keeps `time` and `u_resolution` is twice the viewport size.
    /// Caller-supplied entries with either name are overridden.
    pub fn prepared_for_surface(&self, time: f32, width: u32, height: u32) -> UniformTable {
        let mut prepared = self.clone();
        prepared.insert(TIME, UniformValue::Scalar(time));
        prepared.insert(RESOLUTION, UniformValue::Vec2(resolution_for(width, height)));
        prepared
    }
}

/// `u_resolution` value for a viewport of `width` x `height` pixels.
pub fn resolution_for(width: u32, height: u32) -> [f32; 2] {
    [width as f32 * 2.0, height as f32 * 2.0]
}
