use super::closure_error::ClosureError;

/// Charge category of a species pair. The electron is the species named `e-`; any other name
/// ending in '+' or '-' is an ion.
/// The numeric codes are used by the correction guards (`code() > 1` means both partners charged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    NeutralNeutral,
    NeutralCharged,
    IonIon,
    IonElectron,
    ElectronElectron,
}

impl CollisionType {
    pub fn from_names(name1: &str, name2: &str) -> Self {
        use Charge::*;
        match (Charge::of(name1), Charge::of(name2)) {
            (Electron, Electron) => CollisionType::ElectronElectron,
            (Electron, Ion) | (Ion, Electron) => CollisionType::IonElectron,
            (Ion, Ion) => CollisionType::IonIon,
            (Neutral, Neutral) => CollisionType::NeutralNeutral,
            _ => CollisionType::NeutralCharged,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            CollisionType::NeutralNeutral => 0,
            CollisionType::NeutralCharged => 1,
            CollisionType::IonIon => 2,
            CollisionType::IonElectron => 3,
            CollisionType::ElectronElectron => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Charge {
    Neutral,
    Ion,
    Electron,
}

impl Charge {
    fn of(name: &str) -> Self {
        if name == "e-" {
            Charge::Electron
        } else if name.ends_with('+') || name.ends_with('-') {
            Charge::Ion
        } else {
            Charge::Neutral
        }
    }
}

/// Two species by name and by index into the global species list.
/// The first species is the one whose property is modelled (the vibrating species for V-T).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesPair {
    name1: String,
    name2: String,
    index1: usize,
    index2: usize,
}

impl SpeciesPair {
    pub fn new(name1: &str, name2: &str, index1: usize, index2: usize) -> Self {
        Self {
            name1: name1.to_owned(),
            name2: name2.to_owned(),
            index1,
            index2,
        }
    }

    pub fn name1(&self) -> &str {
        &self.name1
    }
    pub fn name2(&self) -> &str {
        &self.name2
    }
    pub fn index1(&self) -> usize {
        self.index1
    }
    pub fn index2(&self) -> usize {
        self.index2
    }

    pub fn is_diagonal(&self) -> bool {
        self.index1 == self.index2
    }

    /// dictionary key "sp1_sp2"
    pub fn key(&self) -> String {
        format!("{}_{}", self.name1, self.name2)
    }

    pub fn reversed_key(&self) -> String {
        format!("{}_{}", self.name2, self.name1)
    }

    pub fn collision_type(&self) -> CollisionType {
        CollisionType::from_names(&self.name1, &self.name2)
    }
}

/// Flat row-major storage for a rows x cols matrix of per-pair items.
/// `index` is the only place where the linear offset `i * cols + j` is computed.
#[derive(Debug)]
pub struct PairMatrix<T> {
    rows: usize,
    cols: usize,
    items: Vec<T>,
}

impl<T> PairMatrix<T> {
    pub fn from_fn<E>(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> Result<T, E>,
    ) -> Result<Self, E> {
        let mut items = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                items.push(f(i, j)?);
            }
        }
        Ok(Self { rows, cols, items })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self, i: usize, j: usize) -> Result<usize, ClosureError> {
        if i < self.rows && j < self.cols {
            Ok(i * self.cols + j)
        } else {
            Err(ClosureError::IndexOutOfRange {
                i,
                j,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// inverse of `index`
    pub fn pair_of(&self, k: usize) -> (usize, usize) {
        (k / self.cols, k % self.cols)
    }

    pub fn get(&self, i: usize, j: usize) -> Result<&T, ClosureError> {
        let k = self.index(i, j)?;
        Ok(&self.items[k])
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T, ClosureError> {
        let k = self.index(i, j)?;
        Ok(&mut self.items[k])
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(k, item)| (self.pair_of(k), item))
    }
}
