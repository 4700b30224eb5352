use rand::Rng;
use rand_chacha::ChaCha12Rng;
use randwalk_common::{GridPos, Step};
use std::collections::BTreeMap;

use crate::error::KernelError;
use crate::rng::{create_rng, entropy_rng};
use crate::walker::Walker;

/// Upper bound on name draws before `generate_walker_name` gives up.
pub const MAX_NAME_ATTEMPTS: usize = 64;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// A walker together with every position it has occupied since its origin.
#[derive(Debug, Clone)]
pub struct WalkerEntry {
    pub walker: Walker,
    /// First entry is the origin, last entry is the current location.
    pub path: Vec<GridPos>,
}

impl WalkerEntry {
    /// Straight-line displacement from the origin to the current location.
    pub fn distance(&self) -> f64 {
        match (self.path.first(), self.path.last()) {
            (Some(start), Some(end)) => start.distance_to(*end),
            _ => 0.0,
        }
    }
}

/// A 2D field of named walkers.
///
/// Walkers are keyed by name in a BTreeMap, so iteration order is the sorted
/// name order on every platform. The field owns its RNG; two fields built with
/// the same seed and driven by the same calls produce identical walks.
#[derive(Debug, Clone)]
pub struct Field {
    walkers: BTreeMap<String, WalkerEntry>,
    rng: ChaCha12Rng,
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    /// Create an empty field seeded from the operating system.
    pub fn new() -> Self {
        Self {
            walkers: BTreeMap::new(),
            rng: entropy_rng(),
        }
    }

    /// Create an empty field with a deterministic seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            walkers: BTreeMap::new(),
            rng: create_rng(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    pub fn walker(&self, name: &str) -> Option<&Walker> {
        self.walkers.get(name).map(|e| &e.walker)
    }

    pub fn path(&self, name: &str) -> Option<&[GridPos]> {
        self.walkers.get(name).map(|e| e.path.as_slice())
    }

    /// All walker names in iteration order.
    pub fn walker_names(&self) -> Vec<String> {
        self.walkers.keys().cloned().collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &WalkerEntry)> {
        self.walkers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add a walker named `name` at `origin` with path `[origin]`.
    pub fn add_walker(&mut self, name: impl Into<String>, origin: GridPos) -> Result<(), KernelError> {
        let name = name.into();
        if self.walkers.contains_key(&name) {
            return Err(KernelError::DuplicateName(name));
        }
        let walker = Walker::at(name.clone(), origin);
        self.walkers.insert(
            name,
            WalkerEntry {
                walker,
                path: vec![origin],
            },
        );
        Ok(())
    }

    /// Draw a name that no walker in this field uses yet.
    ///
    /// Names are one uppercase letter followed by 1 to 10 lowercase letters.
    pub fn generate_walker_name(&mut self) -> Result<String, KernelError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = random_name(&mut self.rng);
            if !self.walkers.contains_key(&name) {
                tracing::trace!(name = %name, attempt, "generated walker name");
                return Ok(name);
            }
            tracing::warn!(name = %name, attempt, "walker name collision, retrying");
        }
        Err(KernelError::NameGenerationExhausted {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    /// Add `count` walkers with generated names, all starting at `origin`.
    pub fn generate_walkers(&mut self, count: usize, origin: GridPos) -> Result<(), KernelError> {
        for _ in 0..count {
            let name = self.generate_walker_name()?;
            self.add_walker(name, origin)?;
        }
        tracing::debug!(count, %origin, total = self.len(), "generated walkers");
        Ok(())
    }

    /// Move the named walker one random step and record it in its path.
    pub fn move_walker(&mut self, name: &str) -> Result<GridPos, KernelError> {
        let entry = entry_mut(&mut self.walkers, name)?;
        let next = entry.walker.take_step(&mut self.rng)?;
        entry.path.push(next);
        Ok(next)
    }

    /// Move the named walker by a given step and record it in its path.
    pub fn apply_step(&mut self, name: &str, step: Step) -> Result<GridPos, KernelError> {
        let entry = entry_mut(&mut self.walkers, name)?;
        let next = entry.walker.apply_step(step)?;
        entry.path.push(next);
        Ok(next)
    }

    /// Straight-line displacement between the first and last path entries.
    pub fn get_distance(&self, name: &str) -> Result<f64, KernelError> {
        entry(&self.walkers, name).map(WalkerEntry::distance)
    }

    /// Arithmetic mean of every walker's displacement.
    pub fn mean_distance(&self) -> Result<f64, KernelError> {
        if self.walkers.is_empty() {
            return Err(KernelError::EmptyField);
        }
        let total: f64 = self.walkers.values().map(WalkerEntry::distance).sum();
        Ok(total / self.walkers.len() as f64)
    }

    /// Relocate every walker to `origin` and truncate every path to `[origin]`.
    pub fn reset_walkers_paths(&mut self, origin: GridPos) {
        for entry in self.walkers.values_mut() {
            entry.walker.set_location(origin.x(), origin.y());
            entry.path.clear();
            entry.path.push(origin);
        }
    }
}

fn entry<'a>(
    walkers: &'a BTreeMap<String, WalkerEntry>,
    name: &str,
) -> Result<&'a WalkerEntry, KernelError> {
    walkers
        .get(name)
        .ok_or_else(|| KernelError::WalkerNotFound(name.to_string()))
}

fn entry_mut<'a>(
    walkers: &'a mut BTreeMap<String, WalkerEntry>,
    name: &str,
) -> Result<&'a mut WalkerEntry, KernelError> {
    walkers
        .get_mut(name)
        .ok_or_else(|| KernelError::WalkerNotFound(name.to_string()))
}

fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let tail_len = rng.random_range(1..=10);
    let mut name = String::with_capacity(tail_len + 1);
    name.push(UPPERCASE[rng.random_range(0..UPPERCASE.len())] as char);
    for _ in 0..tail_len {
        name.push(LOWERCASE[rng.random_range(0..LOWERCASE.len())] as char);
    }
    name
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for entry in self.walkers.values() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(
                f,
                "{} traveled the distance of length {}",
                entry.walker,
                entry.distance()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const O: GridPos = GridPos::ORIGIN;

    #[test]
    fn field_starts_empty() {
        let f = Field::with_seed(0);
        assert!(f.is_empty());
        assert_eq!(f.len(), 0);
        assert!(f.walker_names().is_empty());
    }

    #[test]
    fn add_walker_records_origin() {
        let mut f = Field::with_seed(0);
        f.add_walker("Dorothy", GridPos::new(2, 3)).unwrap();
        assert_eq!(f.path("Dorothy").unwrap(), &[GridPos::new(2, 3)]);
        assert_eq!(
            f.walker("Dorothy").unwrap().location(),
            Some(GridPos::new(2, 3))
        );
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut f = Field::with_seed(0);
        f.add_walker("Oz", O).unwrap();
        assert_eq!(
            f.add_walker("Oz", GridPos::new(1, 1)),
            Err(KernelError::DuplicateName("Oz".into()))
        );
        assert_eq!(f.len(), 1);
        assert_eq!(f.path("Oz").unwrap(), &[O]);
    }

    #[test]
    fn generated_names_have_expected_shape() {
        let mut f = Field::with_seed(11);
        for _ in 0..500 {
            let name = f.generate_walker_name().unwrap();
            assert!((2..=11).contains(&name.len()), "bad length: {name}");
            let mut chars = name.chars();
            assert!(chars.next().unwrap().is_ascii_uppercase());
            assert!(chars.all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn name_generation_gives_up_after_cap() {
        let mut f = Field::with_seed(17);
        // Occupy exactly the names the field's RNG will draw next.
        let mut upcoming = f.rng.clone();
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = random_name(&mut upcoming);
            let _ = f.add_walker(name, O);
        }
        assert_eq!(
            f.generate_walker_name(),
            Err(KernelError::NameGenerationExhausted { attempts: 64 })
        );
    }

    #[test]
    fn entry_distance_matches_lookup() {
        let mut f = Field::with_seed(0);
        f.add_walker("A", O).unwrap();
        f.apply_step("A", Step::East).unwrap();
        f.apply_step("A", Step::North).unwrap();
        for (name, entry) in f.entries() {
            assert_eq!(entry.distance(), f.get_distance(name).unwrap());
        }
        assert_eq!(f.entries().next().unwrap().1.distance(), 2f64.sqrt());
    }

    #[test]
    fn generate_walkers_distinct_at_origin() {
        let mut f = Field::with_seed(5);
        f.generate_walkers(200, GridPos::new(-1, 4)).unwrap();
        assert_eq!(f.len(), 200);
        let names: HashSet<String> = f.walker_names().into_iter().collect();
        assert_eq!(names.len(), 200);
        for name in &names {
            assert_eq!(f.path(name).unwrap(), &[GridPos::new(-1, 4)]);
        }
    }

    #[test]
    fn move_walker_grows_path_by_one_unit_step() {
        let mut f = Field::with_seed(9);
        f.add_walker("Toto", O).unwrap();
        for i in 1..=50 {
            let before = f.walker("Toto").unwrap().location().unwrap();
            let after = f.move_walker("Toto").unwrap();
            let d = after.0 - before.0;
            assert_eq!(d.x.abs() + d.y.abs(), 1);
            let path = f.path("Toto").unwrap();
            assert_eq!(path.len(), i + 1);
            assert_eq!(*path.last().unwrap(), after);
        }
    }

    #[test]
    fn scripted_walk_scenario() {
        let mut f = Field::with_seed(0);
        f.add_walker("Dorothy", O).unwrap();
        for step in [Step::North, Step::North, Step::East, Step::West] {
            f.apply_step("Dorothy", step).unwrap();
        }
        assert_eq!(
            f.walker("Dorothy").unwrap().location(),
            Some(GridPos::new(0, 2))
        );
        assert_eq!(f.get_distance("Dorothy").unwrap(), 2.0);
        assert_eq!(f.path("Dorothy").unwrap().len(), 5);
    }

    #[test]
    fn distance_is_norm_of_displacement() {
        let mut f = Field::with_seed(21);
        f.add_walker("A", GridPos::new(3, -2)).unwrap();
        for _ in 0..100 {
            f.move_walker("A").unwrap();
            let loc = f.walker("A").unwrap().location().unwrap();
            let expected = ((loc.x() - 3) as f64).hypot((loc.y() + 2) as f64);
            let d = f.get_distance("A").unwrap();
            assert!(d >= 0.0);
            assert!((d - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn distance_after_reset_is_zero() {
        let mut f = Field::with_seed(2);
        f.generate_walkers(3, O).unwrap();
        for name in f.walker_names() {
            for _ in 0..10 {
                f.move_walker(&name).unwrap();
            }
        }
        f.reset_walkers_paths(O);
        for name in f.walker_names() {
            assert_eq!(f.get_distance(&name).unwrap(), 0.0);
        }
    }

    #[test]
    fn reset_truncates_paths_and_relocates() {
        let mut f = Field::with_seed(4);
        f.generate_walkers(5, O).unwrap();
        let names = f.walker_names();
        for name in &names {
            for _ in 0..25 {
                f.move_walker(name).unwrap();
            }
        }
        let target = GridPos::new(10, -10);
        f.reset_walkers_paths(target);
        assert_eq!(f.walker_names(), names);
        for name in &names {
            assert_eq!(f.path(name).unwrap(), &[target]);
            assert_eq!(f.walker(name).unwrap().location(), Some(target));
        }
    }

    #[test]
    fn mean_is_arithmetic_mean() {
        let mut f = Field::with_seed(0);
        f.add_walker("A", O).unwrap();
        f.add_walker("B", O).unwrap();
        f.apply_step("A", Step::North).unwrap();
        f.apply_step("A", Step::North).unwrap();
        f.apply_step("B", Step::East).unwrap();
        f.apply_step("B", Step::East).unwrap();
        f.apply_step("B", Step::East).unwrap();
        f.apply_step("B", Step::North).unwrap();
        f.apply_step("B", Step::North).unwrap();
        f.apply_step("B", Step::North).unwrap();
        f.apply_step("B", Step::North).unwrap();
        // A: 2.0, B: 5.0
        assert_eq!(f.mean_distance().unwrap(), 3.5);
    }

    #[test]
    fn single_walker_mean_equals_distance() {
        let mut f = Field::with_seed(13);
        f.add_walker("Solo", O).unwrap();
        for _ in 0..40 {
            f.move_walker("Solo").unwrap();
        }
        assert_eq!(f.mean_distance().unwrap(), f.get_distance("Solo").unwrap());
    }

    #[test]
    fn two_walkers_without_steps_mean_zero() {
        let mut f = Field::with_seed(0);
        f.add_walker("A", GridPos::new(5, 5)).unwrap();
        f.add_walker("B", GridPos::new(-5, 5)).unwrap();
        f.reset_walkers_paths(O);
        assert_eq!(f.mean_distance().unwrap(), 0.0);
    }

    #[test]
    fn empty_field_mean_fails() {
        let f = Field::with_seed(0);
        assert_eq!(f.mean_distance(), Err(KernelError::EmptyField));
    }

    #[test]
    fn unknown_walker_fails_explicitly() {
        let mut f = Field::with_seed(0);
        f.add_walker("Known", O).unwrap();
        assert_eq!(
            f.get_distance("Unknown"),
            Err(KernelError::WalkerNotFound("Unknown".into()))
        );
        assert_eq!(
            f.move_walker("Unknown"),
            Err(KernelError::WalkerNotFound("Unknown".into()))
        );
        assert_eq!(
            f.apply_step("Unknown", Step::South),
            Err(KernelError::WalkerNotFound("Unknown".into()))
        );
    }

    #[test]
    fn same_seed_same_walks() {
        let run = |seed| {
            let mut f = Field::with_seed(seed);
            f.generate_walkers(4, O).unwrap();
            for name in f.walker_names() {
                for _ in 0..30 {
                    f.move_walker(&name).unwrap();
                }
            }
            f.entries()
                .map(|(n, e)| (n.to_string(), e.path.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn display_lists_every_walker() {
        let mut f = Field::with_seed(0);
        f.add_walker("Dorothy", O).unwrap();
        f.add_walker("Toto", O).unwrap();
        f.apply_step("Toto", Step::West).unwrap();
        let s = f.to_string();
        assert_eq!(
            s,
            "Dorothy at (0, 0) traveled the distance of length 0\n\
             Toto at (-1, 0) traveled the distance of length 1"
        );
    }
}
