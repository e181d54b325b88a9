//! Block palette: every block kind the engine knows, the traits each kind
//! varies by, and the runtime id of every trait combination.
//!
//! States of one kind occupy a contiguous id range. Inside that range the
//! offset is a mixed-radix number whose digits are the trait value indices
//! (last trait varies fastest), so moving between states is arithmetic.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use thiserror::Error;

use crate::catalog::name_key;
use crate::world::block::BlockId;

/// Name of the kind that always owns `BlockId::AIR`.
pub const AIR: &str = "minecraft:air";

static NEXT_TRAIT_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("block kind `{0}` is already registered")]
    DuplicateKind(String),
    #[error("block kind `{kind}` declares trait `{name}` twice")]
    DuplicateTrait { kind: String, name: String },
    #[error("trait `{0}` has no possible values")]
    EmptyTrait(String),
    #[error("`{value}` is not a valid default for trait `{name}` on `{kind}`")]
    InvalidDefault {
        kind: String,
        name: String,
        value: String,
    },
    #[error("palette is full: at most {} states fit in a block id", u16::MAX as u32 + 1)]
    TooManyStates,
    #[error("no block state with runtime id {0}")]
    UnknownState(u16),
    #[error("block kind `{kind}` has no trait `{name}`")]
    TraitNotOnKind { kind: String, name: String },
    #[error("`{value}` is not a value of trait `{name}`")]
    InvalidValue { name: String, value: String },
}

/// Process-unique identity of a trait instance. Two traits with the same
/// name and values are still different traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraitId(u32);

/// What a trait's values are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraitKind {
    /// Named constants in declaration order (`NORTH`, `SOUTH`, ...).
    Enum(Vec<String>),
    /// Inclusive range.
    Integer { min: i32, max: i32 },
    Boolean,
    /// Supplied by a plugin; the engine stores the values but attaches no
    /// meaning to them.
    Custom {
        type_name: String,
        values: Vec<String>,
    },
}

/// A borrowed trait value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitValue<'a> {
    Enum(&'a str),
    Integer(i32),
    Boolean(bool),
    Custom(&'a str),
}

impl fmt::Display for TraitValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Enum(name) | TraitValue::Custom(name) => f.write_str(name),
            TraitValue::Integer(value) => write!(f, "{value}"),
            TraitValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// A named axis of block-state variation. Instances are shared between all
/// kinds that vary the same way (one `facing` trait for stairs, furnaces,
/// chests, ...).
#[derive(Debug)]
pub struct BlockTrait {
    id: TraitId,
    name: String,
    kind: TraitKind,
}

impl BlockTrait {
    fn new(name: &str, kind: TraitKind) -> Arc<Self> {
        Arc::new(Self {
            id: TraitId(NEXT_TRAIT_ID.fetch_add(1, Ordering::Relaxed)),
            name: name.to_string(),
            kind,
        })
    }

    pub fn enumerated<I, S>(name: &str, values: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, TraitKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn integer(name: &str, min: i32, max: i32) -> Arc<Self> {
        Self::new(name, TraitKind::Integer { min, max })
    }

    pub fn boolean(name: &str) -> Arc<Self> {
        Self::new(name, TraitKind::Boolean)
    }

    pub fn custom<I, S>(name: &str, type_name: &str, values: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            TraitKind::Custom {
                type_name: type_name.to_string(),
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn id(&self) -> TraitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TraitKind {
        &self.kind
    }

    /// Number of distinct values.
    pub fn cardinality(&self) -> usize {
        match &self.kind {
            TraitKind::Enum(values) | TraitKind::Custom { values, .. } => values.len(),
            TraitKind::Integer { min, max } if max >= min => (*max as i64 - *min as i64 + 1) as usize,
            TraitKind::Integer { .. } => 0,
            TraitKind::Boolean => 2,
        }
    }

    /// The value at `index` in declaration order.
    pub fn value(&self, index: usize) -> Option<TraitValue<'_>> {
        if index >= self.cardinality() {
            return None;
        }
        Some(match &self.kind {
            TraitKind::Enum(values) => TraitValue::Enum(&values[index]),
            TraitKind::Custom { values, .. } => TraitValue::Custom(&values[index]),
            TraitKind::Integer { min, .. } => TraitValue::Integer(min + index as i32),
            TraitKind::Boolean => TraitValue::Boolean(index == 1),
        })
    }

    /// Inverse of [`value`](Self::value). Enum names match case-insensitively.
    pub fn index_of(&self, value: TraitValue<'_>) -> Option<usize> {
        match (&self.kind, value) {
            (TraitKind::Enum(values), TraitValue::Enum(name)) => {
                values.iter().position(|v| v.eq_ignore_ascii_case(name))
            }
            (TraitKind::Custom { values, .. }, TraitValue::Custom(name)) => {
                values.iter().position(|v| v == name)
            }
            (TraitKind::Integer { min, max }, TraitValue::Integer(v)) if (*min..=*max).contains(&v) => {
                Some((v - min) as usize)
            }
            (TraitKind::Boolean, TraitValue::Boolean(v)) => Some(v as usize),
            _ => None,
        }
    }

    /// Parse the textual form of a value.
    pub fn parse_value(&self, text: &str) -> Option<TraitValue<'_>> {
        match &self.kind {
            TraitKind::Enum(values) => values
                .iter()
                .find(|v| v.eq_ignore_ascii_case(text))
                .map(|v| TraitValue::Enum(v)),
            TraitKind::Custom { values, .. } => values
                .iter()
                .find(|v| *v == text)
                .map(|v| TraitValue::Custom(v)),
            TraitKind::Integer { min, max } => text
                .parse::<i32>()
                .ok()
                .filter(|v| (*min..=*max).contains(v))
                .map(TraitValue::Integer),
            TraitKind::Boolean => text.parse::<bool>().ok().map(TraitValue::Boolean),
        }
    }

    pub fn possible_values(&self) -> impl Iterator<Item = TraitValue<'_>> + '_ {
        (0..self.cardinality()).filter_map(move |i| self.value(i))
    }
}

/// Index of a kind in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(u16);

impl KindId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Gameplay flags the editor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBehavior {
    pub solid: bool,
    /// Chance modifier for fire spreading onto the block; 0 = does not burn.
    pub burn_ability: u8,
    pub light_emission: u8,
    /// Backed by a per-position inventory in the level (chests, furnaces).
    pub container: bool,
}

impl Default for BlockBehavior {
    fn default() -> Self {
        Self {
            solid: true,
            burn_ability: 0,
            light_emission: 0,
            container: false,
        }
    }
}

/// A registered block kind and its slice of the state table.
#[derive(Debug)]
pub struct BlockKind {
    id: KindId,
    name: String,
    traits: Vec<Arc<BlockTrait>>,
    strides: Vec<u32>,
    first: u16,
    state_count: u32,
    default_offset: u32,
    behavior: BlockBehavior,
}

impl BlockKind {
    pub fn id(&self) -> KindId {
        self.id
    }

    /// The name as the kind was registered (not case-folded).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn traits(&self) -> &[Arc<BlockTrait>] {
        &self.traits
    }

    pub fn behavior(&self) -> BlockBehavior {
        self.behavior
    }

    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    pub fn first_state(&self) -> BlockId {
        BlockId(self.first)
    }

    pub fn default_state(&self) -> BlockId {
        BlockId(self.first + self.default_offset as u16)
    }

    pub fn contains(&self, state: BlockId) -> bool {
        state.0 >= self.first && ((state.0 - self.first) as u32) < self.state_count
    }

    pub fn states(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.state_count).map(move |offset| BlockId(self.first + offset as u16))
    }

    /// Position of a trait in this kind, matched by identity.
    pub fn trait_position(&self, host_trait: &BlockTrait) -> Option<usize> {
        self.traits.iter().position(|t| t.id == host_trait.id)
    }

    fn value_index(&self, state: BlockId, position: usize) -> usize {
        let offset = (state.0 - self.first) as u32;
        ((offset / self.strides[position]) % self.traits[position].cardinality() as u32) as usize
    }
}

/// Declaration of a kind, consumed by [`PaletteBuilder::register`].
#[derive(Debug, Clone)]
pub struct BlockKindDef {
    name: String,
    traits: Vec<(Arc<BlockTrait>, Option<String>)>,
    behavior: BlockBehavior,
}

impl BlockKindDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            traits: Vec::new(),
            behavior: BlockBehavior::default(),
        }
    }

    /// Add a trait whose default is its first value.
    pub fn with_trait(mut self, host_trait: &Arc<BlockTrait>) -> Self {
        self.traits.push((Arc::clone(host_trait), None));
        self
    }

    /// Add a trait with an explicit default, given in textual form.
    pub fn with_trait_default(mut self, host_trait: &Arc<BlockTrait>, default: &str) -> Self {
        self.traits.push((Arc::clone(host_trait), Some(default.to_string())));
        self
    }

    pub fn non_solid(mut self) -> Self {
        self.behavior.solid = false;
        self
    }

    pub fn burns(mut self, ability: u8) -> Self {
        self.behavior.burn_ability = ability;
        self
    }

    pub fn emits_light(mut self, level: u8) -> Self {
        self.behavior.light_emission = level;
        self
    }

    pub fn container(mut self) -> Self {
        self.behavior.container = true;
        self
    }
}

/// Incrementally assigns state ids. Air is registered on construction.
pub struct PaletteBuilder {
    kinds: Vec<BlockKind>,
    by_name: HashMap<String, KindId>,
    next_state: u32,
}

impl PaletteBuilder {
    pub fn new() -> Self {
        let air = BlockKind {
            id: KindId(0),
            name: AIR.to_string(),
            traits: Vec::new(),
            strides: Vec::new(),
            first: 0,
            state_count: 1,
            default_offset: 0,
            behavior: BlockBehavior {
                solid: false,
                ..BlockBehavior::default()
            },
        };
        Self {
            by_name: HashMap::from([(AIR.to_string(), KindId(0))]),
            kinds: vec![air],
            next_state: 1,
        }
    }

    /// Add a kind. Names that differ only in case, surrounding space or an
    /// omitted `minecraft:` namespace name the same kind and are rejected.
    pub fn register(&mut self, def: BlockKindDef) -> Result<KindId, PaletteError> {
        let key = name_key(&def.name);
        if self.by_name.contains_key(&key) {
            return Err(PaletteError::DuplicateKind(def.name));
        }

        let mut state_count: u32 = 1;
        for (i, (host_trait, _)) in def.traits.iter().enumerate() {
            if def.traits[..i].iter().any(|(t, _)| t.name == host_trait.name) {
                return Err(PaletteError::DuplicateTrait {
                    kind: def.name.clone(),
                    name: host_trait.name.clone(),
                });
            }
            let cardinality = host_trait.cardinality();
            if cardinality == 0 {
                return Err(PaletteError::EmptyTrait(host_trait.name.clone()));
            }
            state_count = u32::try_from(cardinality)
                .ok()
                .and_then(|c| state_count.checked_mul(c))
                .ok_or(PaletteError::TooManyStates)?;
        }
        let first = self.next_state;
        if first as u64 + state_count as u64 > u16::MAX as u64 + 1
            || self.kinds.len() > u16::MAX as usize
        {
            return Err(PaletteError::TooManyStates);
        }

        let mut strides = vec![1u32; def.traits.len()];
        for i in (0..def.traits.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * def.traits[i + 1].0.cardinality() as u32;
        }

        let mut default_offset = 0;
        for (i, (host_trait, default)) in def.traits.iter().enumerate() {
            let index = match default {
                None => 0,
                Some(text) => host_trait
                    .parse_value(text)
                    .and_then(|v| host_trait.index_of(v))
                    .ok_or_else(|| PaletteError::InvalidDefault {
                        kind: def.name.clone(),
                        name: host_trait.name.clone(),
                        value: text.clone(),
                    })?,
            };
            default_offset += index as u32 * strides[i];
        }

        let id = KindId(self.kinds.len() as u16);
        self.kinds.push(BlockKind {
            id,
            name: def.name,
            traits: def.traits.into_iter().map(|(t, _)| t).collect(),
            strides,
            first: first as u16,
            state_count,
            default_offset,
            behavior: def.behavior,
        });
        self.by_name.insert(key, id);
        self.next_state += state_count;
        Ok(id)
    }

    pub fn build(self) -> BlockPalette {
        let mut state_kinds = Vec::with_capacity(self.next_state as usize);
        for kind in &self.kinds {
            state_kinds.extend(std::iter::repeat_n(kind.id, kind.state_count as usize));
        }
        tracing::debug!(
            "Block palette built: {} kinds, {} states",
            self.kinds.len(),
            state_kinds.len()
        );
        BlockPalette {
            kinds: self.kinds,
            by_name: self.by_name,
            state_kinds,
        }
    }
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The engine's complete, immutable block-state table.
pub struct BlockPalette {
    kinds: Vec<BlockKind>,
    by_name: HashMap<String, KindId>,
    state_kinds: Vec<KindId>,
}

impl BlockPalette {
    pub fn builder() -> PaletteBuilder {
        PaletteBuilder::new()
    }

    /// Total number of states.
    pub fn len(&self) -> usize {
        self.state_kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state_kinds.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &BlockKind> {
        self.kinds.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = BlockId> + use<> {
        (0..self.state_kinds.len()).map(|i| BlockId(i as u16))
    }

    pub fn kind(&self, id: KindId) -> Option<&BlockKind> {
        self.kinds.get(id.index())
    }

    pub fn kind_of(&self, state: BlockId) -> Option<&BlockKind> {
        self.state_kinds
            .get(state.index())
            .and_then(|id| self.kind(*id))
    }

    /// Look a kind up by name, ignoring ASCII case. A bare name resolves in
    /// the `minecraft` namespace.
    pub fn kind_by_name(&self, name: &str) -> Option<&BlockKind> {
        self.by_name
            .get(&name_key(name))
            .and_then(|id| self.kind(*id))
    }

    pub fn default_state(&self, name: &str) -> Option<BlockId> {
        self.kind_by_name(name).map(BlockKind::default_state)
    }

    /// Every (trait, value) assignment of `state`, in the kind's trait order.
    pub fn values(
        &self,
        state: BlockId,
    ) -> Result<impl Iterator<Item = (&Arc<BlockTrait>, TraitValue<'_>)>, PaletteError> {
        let kind = self
            .kind_of(state)
            .ok_or(PaletteError::UnknownState(state.0))?;
        Ok(kind
            .traits
            .iter()
            .enumerate()
            .filter_map(move |(pos, t)| t.value(kind.value_index(state, pos)).map(|v| (t, v))))
    }

    /// The value `state` assigns to `host_trait`, if the kind has that trait.
    pub fn value(&self, state: BlockId, host_trait: &BlockTrait) -> Option<TraitValue<'_>> {
        let kind = self.kind_of(state)?;
        let pos = kind.trait_position(host_trait)?;
        kind.traits[pos].value(kind.value_index(state, pos))
    }

    /// The state that equals `state` except that `host_trait` is `value`.
    pub fn with_trait(
        &self,
        state: BlockId,
        host_trait: &BlockTrait,
        value: TraitValue<'_>,
    ) -> Result<BlockId, PaletteError> {
        let kind = self
            .kind_of(state)
            .ok_or(PaletteError::UnknownState(state.0))?;
        let pos = kind
            .trait_position(host_trait)
            .ok_or_else(|| PaletteError::TraitNotOnKind {
                kind: kind.name.clone(),
                name: host_trait.name.clone(),
            })?;
        let new_index = host_trait
            .index_of(value)
            .ok_or_else(|| PaletteError::InvalidValue {
                name: host_trait.name.clone(),
                value: value.to_string(),
            })?;
        let old_index = kind.value_index(state, pos);
        let stride = kind.strides[pos] as i64;
        let shifted = state.0 as i64 + (new_index as i64 - old_index as i64) * stride;
        Ok(BlockId(shifted as u16))
    }

    /// Textual form, e.g. `minecraft:oak_log[axis=Y]`.
    pub fn describe(&self, state: BlockId) -> String {
        let Some(kind) = self.kind_of(state) else {
            return format!("<unknown state {}>", state.0);
        };
        let Ok(values) = self.values(state) else {
            return kind.name.clone();
        };
        let props: Vec<String> = values
            .map(|(t, v)| format!("{}={}", t.name, v))
            .collect();
        if props.is_empty() {
            kind.name.clone()
        } else {
            format!("{}[{}]", kind.name, props.join(","))
        }
    }
}

impl fmt::Debug for BlockPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockPalette")
            .field("kinds", &self.kinds.len())
            .field("states", &self.state_kinds.len())
            .finish()
    }
}
