//! Outgoing-energy laws of the ACE format.
//!
//! Every law maps an incident energy to a sampled outgoing energy. The `DLW` block of a reaction
//! starts with the header
//!
//! | index | content                                          |
//! |-------|--------------------------------------------------|
//! | 0     | `LNW`, locator of the next law, must be zero     |
//! | 1     | `LAW`, the law number                            |
//! | 2     | `IDAT`, one-based locator of the law data        |
//! | 3     | `NR` of the law applicability, must be zero      |
//!
//! and `IDAT` as well as the locators inside law 4 are relative to the one-based index that the
//! block starts at in the full table.
use crate::core::error::{require_finite, require_positive, DistributionError, Result};
use crate::core::random::RandomSource;
use crate::core::search;
use crate::core::{Interpolation, OneDDistribution};
use crate::distributions::{
    EvaporationDistribution, MaxwellFissionDistribution, TabularDistribution, WattDistribution,
};
use crate::factories::{
    count, entries, entry, integer, locator, parameter_table, require_single_region,
    ParameterTable,
};

/// Samples outgoing energies for a given incident energy.
pub trait ScatteringEnergyLaw: Send + Sync {
    /// Samples an outgoing energy and adds the number of rejection trials to `trials`.
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized;

    /// Samples an outgoing energy.
    fn sample_energy<R>(&self, rng: &mut R, incident_energy: f64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let mut trials = 0;
        self.sample_energy_and_record_trials(rng, incident_energy, &mut trials)
    }
}

/// Returns the index `i` of the incident-energy bin containing `energy` and the fraction of the
/// way from `grid[i]` to `grid[i + 1]`, clamped to `[0, 1]`.
fn incident_bin(grid: &[f64], energy: f64) -> (usize, f64) {
    if grid.len() < 2 || !(energy > grid[0]) {
        return (0, 0.0);
    }

    let last = grid.len() - 1;

    if energy >= grid[last] {
        return (last - 1, 1.0);
    }

    let i = search::bracket(grid, &energy);

    (i, (energy - grid[i]) / (grid[i + 1] - grid[i]))
}

/// Picks one of `bins` equiprobable bins with `u`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn equiprobable_bin(bins: usize, u: f64) -> usize {
    ((u * bins as f64) as usize).min(bins - 1)
}

/// Picks one of `boundaries.len() - 1` equiprobable bins with `u1` and a uniform point inside of
/// it with `u2`.
fn equiprobable_sample(boundaries: &[f64], u1: f64, u2: f64) -> f64 {
    let k = equiprobable_bin(boundaries.len() - 1, u1);

    boundaries[k] + u2 * (boundaries[k + 1] - boundaries[k])
}

fn validate_boundaries(boundaries: &[f64]) -> Result<()> {
    if boundaries.len() < 2 {
        return Err(DistributionError::invalid(
            "equiprobable bins need at least two boundaries",
        ));
    }

    for &boundary in boundaries {
        require_finite("bin boundary", boundary)?;
    }

    if boundaries.windows(2).any(|w| w[1] < w[0]) {
        return Err(DistributionError::invalid(
            "the boundaries of equiprobable bins must not decrease",
        ));
    }

    Ok(())
}

fn validate_incident_energies(energies: &[f64]) -> Result<()> {
    if energies.is_empty() {
        return Err(DistributionError::invalid("no incident energies"));
    }

    for &energy in energies {
        require_finite("incident energy", energy)?;
    }

    if energies.windows(2).any(|w| w[1] <= w[0]) {
        return Err(DistributionError::invalid(
            "incident energies must be strictly increasing",
        ));
    }

    Ok(())
}

fn require_positive_values(table: &ParameterTable, what: &str) -> Result<()> {
    table
        .values()
        .iter()
        .try_for_each(|&value| require_positive(what, value))
}

/// Law 1: equiprobable outgoing-energy bins for every incident energy. The bin boundaries are
/// interpolated linearly between incident energies.
#[derive(Clone, Debug, PartialEq)]
pub struct EquiprobableBinsLaw {
    incident_energies: Vec<f64>,
    boundaries: Vec<Vec<f64>>,
}

impl EquiprobableBinsLaw {
    /// Constructor. Every incident energy needs the same number of boundaries.
    pub fn new(incident_energies: &[f64], boundaries: Vec<Vec<f64>>) -> Result<Self> {
        validate_incident_energies(incident_energies)?;

        if boundaries.len() != incident_energies.len() {
            return Err(DistributionError::invalid(format!(
                "expected {} sets of bin boundaries, got {}",
                incident_energies.len(),
                boundaries.len()
            )));
        }

        for row in &boundaries {
            validate_boundaries(row)?;

            if row.len() != boundaries[0].len() {
                return Err(DistributionError::invalid(
                    "every incident energy needs the same number of bin boundaries",
                ));
            }
        }

        Ok(Self {
            incident_energies: incident_energies.to_vec(),
            boundaries,
        })
    }
}

impl ScatteringEnergyLaw for EquiprobableBinsLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        *trials += 1;

        let (i, fraction) = incident_bin(&self.incident_energies, incident_energy);
        let lower = &self.boundaries[i];
        let upper = self.boundaries.get(i + 1).unwrap_or(lower);

        let k = equiprobable_bin(lower.len() - 1, rng.random_number());
        let low = lower[k] + fraction * (upper[k] - lower[k]);
        let high = lower[k + 1] + fraction * (upper[k + 1] - lower[k + 1]);

        low + rng.random_number() * (high - low)
    }
}

/// Law 2: a discrete photon energy `E_g`. Primary photons (`LP = 2`) also receive the fraction
/// `A/(A + 1)` of the incident energy, with `A` the atomic weight ratio of the target.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscretePhotonLaw {
    photon_energy: f64,
    incident_energy_fraction: f64,
}

impl DiscretePhotonLaw {
    /// Constructor. `primary_flag` is the `LP` of the table, `0` and `1` keep the photon energy
    /// fixed and `2` marks a primary photon.
    pub fn new(primary_flag: i64, photon_energy: f64, atomic_weight_ratio: f64) -> Result<Self> {
        require_finite("photon energy", photon_energy)?;

        let incident_energy_fraction = match primary_flag {
            0 | 1 => 0.0,
            2 => {
                require_positive("atomic weight ratio", atomic_weight_ratio)?;
                atomic_weight_ratio / (atomic_weight_ratio + 1.0)
            }
            other => {
                return Err(DistributionError::invalid(format!(
                    "primary photon flag must be 0, 1 or 2, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            photon_energy,
            incident_energy_fraction,
        })
    }
}

impl ScatteringEnergyLaw for DiscretePhotonLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        _rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        *trials += 1;
        self.photon_energy + self.incident_energy_fraction * incident_energy
    }
}

/// Law 3: inelastic scattering to a discrete level, `E' = B (E - A)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelScatteringLaw {
    threshold: f64,
    energy_ratio: f64,
}

impl LevelScatteringLaw {
    /// Constructor. `threshold` is `(A + 1)/A |Q|` and `energy_ratio` is `(A/(A + 1))²`.
    pub fn new(threshold: f64, energy_ratio: f64) -> Result<Self> {
        require_finite("level threshold", threshold)?;
        require_positive("energy ratio", energy_ratio)?;

        Ok(Self {
            threshold,
            energy_ratio,
        })
    }
}

impl ScatteringEnergyLaw for LevelScatteringLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        _rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        *trials += 1;
        (self.energy_ratio * (incident_energy - self.threshold)).max(0.0)
    }
}

/// Outgoing energies with a constant density between neighbouring grid points.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramTable {
    energies: Vec<f64>,
    densities: Vec<f64>,
    cdf: Vec<f64>,
}

impl HistogramTable {
    /// Constructor. `densities[i]` holds on `[energies[i], energies[i + 1])`, a density given for
    /// the last grid point is ignored.
    pub fn new(energies: &[f64], densities: &[f64]) -> Result<Self> {
        if densities.len() + 1 != energies.len() && densities.len() != energies.len() {
            return Err(DistributionError::invalid(format!(
                "a histogram over {} energies needs {} densities, got {}",
                energies.len(),
                energies.len().saturating_sub(1),
                densities.len()
            )));
        }

        let densities = &densities[..energies.len().saturating_sub(1)];
        let mut padded = densities.to_vec();
        padded.push(0.0);
        Interpolation::LinLin.validate_grid(energies, &padded)?;

        let mut cdf = Vec::with_capacity(energies.len());
        cdf.push(0.0);

        for (w, &density) in energies.windows(2).zip(densities) {
            let last = cdf[cdf.len() - 1];
            cdf.push(last + density * (w[1] - w[0]));
        }

        if !(cdf[cdf.len() - 1] > 0.0) {
            return Err(DistributionError::invalid(
                "a histogram needs a positive integral",
            ));
        }

        Ok(Self {
            energies: energies.to_vec(),
            densities: densities.to_vec(),
            cdf,
        })
    }

    fn lower_bound(&self) -> f64 {
        self.energies[0]
    }

    fn upper_bound(&self) -> f64 {
        self.energies[self.energies.len() - 1]
    }

    fn sample_with_random_number(&self, u: f64) -> f64 {
        let target = u * self.cdf[self.cdf.len() - 1];
        let i = search::bracket(&self.cdf, &target);
        let density = self.densities[i];

        if density > 0.0 {
            (self.energies[i] + (target - self.cdf[i]) / density).min(self.energies[i + 1])
        } else {
            self.energies[i]
        }
    }
}

/// The outgoing-energy table of one incident energy of law 4.
#[derive(Clone, Debug, PartialEq)]
pub enum OutgoingEnergyTable {
    /// Interpolation flag 1.
    Histogram(HistogramTable),
    /// Interpolation flag 2.
    LinLin(TabularDistribution),
}

impl OutgoingEnergyTable {
    fn lower_bound(&self) -> f64 {
        match self {
            Self::Histogram(table) => table.lower_bound(),
            Self::LinLin(table) => table.lower_bound(),
        }
    }

    fn upper_bound(&self) -> f64 {
        match self {
            Self::Histogram(table) => table.upper_bound(),
            Self::LinLin(table) => table.upper_bound(),
        }
    }

    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        match self {
            Self::Histogram(table) => {
                *trials += 1;
                table.sample_with_random_number(rng.random_number())
            }
            Self::LinLin(table) => table.sample_and_record_trials(rng, trials),
        }
    }
}

impl From<TabularDistribution> for OutgoingEnergyTable {
    fn from(table: TabularDistribution) -> Self {
        Self::LinLin(table)
    }
}

impl From<HistogramTable> for OutgoingEnergyTable {
    fn from(table: HistogramTable) -> Self {
        Self::Histogram(table)
    }
}

/// Law 4: a tabulated outgoing-energy distribution for every incident energy.
///
/// Between two incident energies one of the neighbouring tables is picked with a probability
/// given by the distance to it, and the sample is scaled onto the interpolated outgoing-energy
/// range.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousTabularLaw {
    incident_energies: Vec<f64>,
    distributions: Vec<OutgoingEnergyTable>,
}

impl ContinuousTabularLaw {
    /// Constructor.
    pub fn new(incident_energies: &[f64], distributions: Vec<OutgoingEnergyTable>) -> Result<Self> {
        validate_incident_energies(incident_energies)?;

        if distributions.len() != incident_energies.len() {
            return Err(DistributionError::invalid(format!(
                "expected {} outgoing-energy distributions, got {}",
                incident_energies.len(),
                distributions.len()
            )));
        }

        Ok(Self {
            incident_energies: incident_energies.to_vec(),
            distributions,
        })
    }

    /// The tabulated outgoing-energy distributions.
    pub fn distributions(&self) -> &[OutgoingEnergyTable] {
        &self.distributions
    }
}

impl ScatteringEnergyLaw for ContinuousTabularLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let last = self.incident_energies.len() - 1;

        if last == 0 || !(incident_energy > self.incident_energies[0]) {
            return self.distributions[0].sample_and_record_trials(rng, trials);
        }

        if incident_energy >= self.incident_energies[last] {
            return self.distributions[last].sample_and_record_trials(rng, trials);
        }

        let (i, fraction) = incident_bin(&self.incident_energies, incident_energy);
        let below = &self.distributions[i];
        let above = &self.distributions[i + 1];

        let chosen = if rng.random_number() < fraction {
            above
        } else {
            below
        };
        let sample = chosen.sample_and_record_trials(rng, trials);

        let min = below.lower_bound() + fraction * (above.lower_bound() - below.lower_bound());
        let max = below.upper_bound() + fraction * (above.upper_bound() - below.upper_bound());

        min + (sample - chosen.lower_bound()) * (max - min)
            / (chosen.upper_bound() - chosen.lower_bound())
    }
}

/// Law 5: a general evaporation spectrum `E' = x θ(E)`, with `x` drawn from equiprobable bins.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralEvaporationLaw {
    temperature: ParameterTable,
    boundaries: Vec<f64>,
}

impl GeneralEvaporationLaw {
    /// Constructor.
    pub fn new(temperature: ParameterTable, boundaries: &[f64]) -> Result<Self> {
        require_positive_values(&temperature, "effective temperature")?;
        validate_boundaries(boundaries)?;

        Ok(Self {
            temperature,
            boundaries: boundaries.to_vec(),
        })
    }
}

impl ScatteringEnergyLaw for GeneralEvaporationLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        *trials += 1;

        let u1 = rng.random_number();
        let u2 = rng.random_number();

        equiprobable_sample(&self.boundaries, u1, u2) * self.temperature.evaluate(incident_energy)
    }
}

/// Law 7: a Maxwell fission spectrum with an energy-dependent nuclear temperature.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleMaxwellFissionLaw {
    temperature: ParameterTable,
    restriction_energy: f64,
}

impl SimpleMaxwellFissionLaw {
    /// Constructor.
    pub fn new(temperature: ParameterTable, restriction_energy: f64) -> Result<Self> {
        require_positive_values(&temperature, "nuclear temperature")?;
        require_finite("restriction energy", restriction_energy)?;

        Ok(Self {
            temperature,
            restriction_energy,
        })
    }
}

impl ScatteringEnergyLaw for SimpleMaxwellFissionLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        MaxwellFissionDistribution::sample_and_record_trials_with_parameters(
            rng,
            incident_energy,
            self.temperature.evaluate(incident_energy),
            self.restriction_energy,
            trials,
        )
    }
}

/// Law 9: an evaporation spectrum with an energy-dependent nuclear temperature.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaporationLaw {
    temperature: ParameterTable,
    restriction_energy: f64,
}

impl EvaporationLaw {
    /// Constructor.
    pub fn new(temperature: ParameterTable, restriction_energy: f64) -> Result<Self> {
        require_positive_values(&temperature, "nuclear temperature")?;
        require_finite("restriction energy", restriction_energy)?;

        Ok(Self {
            temperature,
            restriction_energy,
        })
    }
}

impl ScatteringEnergyLaw for EvaporationLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        EvaporationDistribution::sample_and_record_trials_with_parameters(
            rng,
            incident_energy,
            self.temperature.evaluate(incident_energy),
            self.restriction_energy,
            trials,
        )
    }
}

/// Law 11: a Watt spectrum with energy-dependent `a` and `b` parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct WattLaw {
    a_parameter: ParameterTable,
    b_parameter: ParameterTable,
    restriction_energy: f64,
}

impl WattLaw {
    /// Constructor.
    pub fn new(
        a_parameter: ParameterTable,
        b_parameter: ParameterTable,
        restriction_energy: f64,
    ) -> Result<Self> {
        require_positive_values(&a_parameter, "a parameter")?;
        require_positive_values(&b_parameter, "b parameter")?;
        require_finite("restriction energy", restriction_energy)?;

        Ok(Self {
            a_parameter,
            b_parameter,
            restriction_energy,
        })
    }
}

impl ScatteringEnergyLaw for WattLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        WattDistribution::sample_and_record_trials_with_parameters(
            rng,
            incident_energy,
            self.a_parameter.evaluate(incident_energy),
            self.b_parameter.evaluate(incident_energy),
            self.restriction_energy,
            trials,
        )
    }
}

/// The supported ACE energy laws.
#[derive(Clone, Debug, PartialEq)]
pub enum EnergyLaw {
    /// Law 1.
    EquiprobableBins(EquiprobableBinsLaw),
    /// Law 2.
    DiscretePhoton(DiscretePhotonLaw),
    /// Law 3.
    LevelScattering(LevelScatteringLaw),
    /// Law 4.
    ContinuousTabular(ContinuousTabularLaw),
    /// Law 5.
    GeneralEvaporation(GeneralEvaporationLaw),
    /// Law 7.
    SimpleMaxwellFission(SimpleMaxwellFissionLaw),
    /// Law 9.
    Evaporation(EvaporationLaw),
    /// Law 11.
    Watt(WattLaw),
}

impl EnergyLaw {
    /// The number of the law in the ACE format.
    pub fn law_number(&self) -> u32 {
        match self {
            Self::EquiprobableBins(_) => 1,
            Self::DiscretePhoton(_) => 2,
            Self::LevelScattering(_) => 3,
            Self::ContinuousTabular(_) => 4,
            Self::GeneralEvaporation(_) => 5,
            Self::SimpleMaxwellFission(_) => 7,
            Self::Evaporation(_) => 9,
            Self::Watt(_) => 11,
        }
    }
}

impl ScatteringEnergyLaw for EnergyLaw {
    fn sample_energy_and_record_trials<R>(
        &self,
        rng: &mut R,
        incident_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        match self {
            Self::EquiprobableBins(law) => {
                law.sample_energy_and_record_trials(rng, incident_energy, trials)
            }
            Self::DiscretePhoton(law) => {
                law.sample_energy_and_record_trials(rng, incident_energy, trials)
            }
            Self::LevelScattering(law) => {
                law.sample_energy_and_record_trials(rng, incident_energy, trials)
            }
            Self::ContinuousTabular(law) => {
                law.sample_energy_and_record_trials(rng, incident_energy, trials)
            }
            Self::GeneralEvaporation(law) => {
                law.sample_energy_and_record_trials(rng, incident_energy, trials)
            }
            Self::SimpleMaxwellFission(law) => {
                law.sample_energy_and_record_trials(rng, incident_energy, trials)
            }
            Self::Evaporation(law) => {
                law.sample_energy_and_record_trials(rng, incident_energy, trials)
            }
            Self::Watt(law) => law.sample_energy_and_record_trials(rng, incident_energy, trials),
        }
    }
}

/// Builds the energy law described by the `DLW` block `dlw` of the table `table_name`, where
/// `start_index` is the one-based index of the first entry of `dlw` in the full table, minus one.
/// The `atomic_weight_ratio` of the target is only read by primary photons of law 2.
///
/// Fails with `UnsupportedFormat` for laws other than 1, 2, 3, 4, 5, 7, 9 and 11, for blocks with
/// more than one law, for interpolation regions other than a single lin-lin one and for law 4
/// tables with discrete lines or interpolation flags other than histogram and lin-lin.
pub fn create_energy_law(
    table_name: &str,
    dlw: &[f64],
    start_index: usize,
    atomic_weight_ratio: f64,
) -> Result<EnergyLaw> {
    match build_energy_law(dlw, start_index, atomic_weight_ratio) {
        Ok(law) => {
            tracing::debug!(
                "created ACE energy law {} for table '{}'",
                law.law_number(),
                table_name
            );
            Ok(law)
        }
        Err(error) => {
            tracing::warn!("no energy law for table '{}': {}", table_name, error);
            Err(error.in_table(table_name))
        }
    }
}

fn build_energy_law(
    dlw: &[f64],
    start_index: usize,
    atomic_weight_ratio: f64,
) -> Result<EnergyLaw> {
    if integer(dlw, 0, "locator of the next law")? != 0 {
        return Err(DistributionError::unsupported(
            "more than one energy law per reaction",
        ));
    }

    let law = integer(dlw, 1, "law number")?;
    let ldat = locator(dlw, 2, start_index, "locator of the law data")?;
    require_single_region(dlw, 3)?;

    match law {
        1 => equiprobable_bins_law(dlw, ldat).map(EnergyLaw::EquiprobableBins),
        2 => DiscretePhotonLaw::new(
            integer(dlw, ldat, "primary photon flag")?,
            entry(dlw, ldat + 1, "photon energy")?,
            atomic_weight_ratio,
        )
        .map(EnergyLaw::DiscretePhoton),
        3 => LevelScatteringLaw::new(
            entry(dlw, ldat, "level threshold")?,
            entry(dlw, ldat + 1, "energy ratio")?,
        )
        .map(EnergyLaw::LevelScattering),
        4 => continuous_tabular_law(dlw, ldat, start_index).map(EnergyLaw::ContinuousTabular),
        5 => general_evaporation_law(dlw, ldat).map(EnergyLaw::GeneralEvaporation),
        7 => {
            let (temperature, restriction_energy) = temperature_law(dlw, ldat)?;
            SimpleMaxwellFissionLaw::new(temperature, restriction_energy)
                .map(EnergyLaw::SimpleMaxwellFission)
        }
        9 => {
            let (temperature, restriction_energy) = temperature_law(dlw, ldat)?;
            EvaporationLaw::new(temperature, restriction_energy).map(EnergyLaw::Evaporation)
        }
        11 => watt_law(dlw, ldat).map(EnergyLaw::Watt),
        other => Err(DistributionError::unsupported(format!(
            "ACE energy law {}",
            other
        ))),
    }
}

/// `NR, NE, E[NE], NET, E'[NE][NET]`
fn equiprobable_bins_law(dlw: &[f64], ldat: usize) -> Result<EquiprobableBinsLaw> {
    require_single_region(dlw, ldat)?;

    let incident = count(dlw, ldat + 1, "number of incident energies")?;
    let energies = entries(dlw, ldat + 2, incident, "incident energies")?;
    let bins = count(dlw, ldat + 2 + incident, "number of bin boundaries")?;
    let start = ldat + 3 + incident;

    let boundaries = (0..incident)
        .map(|i| entries(dlw, start + i * bins, bins, "bin boundaries").map(<[f64]>::to_vec))
        .collect::<Result<Vec<_>>>()?;

    EquiprobableBinsLaw::new(energies, boundaries)
}

/// `NR, NE, E[NE], L[NE]`, every `L` pointing to `INTT, NP, E'[NP], PDF[NP], CDF[NP]`. An
/// `INTT` of `10 ND + 1` or `10 ND + 2` announces `ND` discrete lines ahead of the continuous part.
fn continuous_tabular_law(
    dlw: &[f64],
    ldat: usize,
    start_index: usize,
) -> Result<ContinuousTabularLaw> {
    require_single_region(dlw, ldat)?;

    let incident = count(dlw, ldat + 1, "number of incident energies")?;
    let energies = entries(dlw, ldat + 2, incident, "incident energies")?;

    let distributions = (0..incident)
        .map(|i| {
            let at = locator(dlw, ldat + 2 + incident + i, start_index, "distribution locator")?;
            let interpolation = integer(dlw, at, "interpolation flag")?;

            if interpolation >= 10 {
                return Err(DistributionError::unsupported(format!(
                    "{} discrete outgoing-energy lines (interpolation flag {})",
                    interpolation / 10,
                    interpolation
                )));
            }

            if interpolation != 1 && interpolation != 2 {
                return Err(DistributionError::unsupported(format!(
                    "outgoing-energy interpolation flag {}, only histogram (1) and lin-lin (2) \
                     are supported",
                    interpolation
                )));
            }

            let points = count(dlw, at + 1, "number of outgoing energies")?;
            let outgoing = entries(dlw, at + 2, points, "outgoing energies")?;
            let pdf = entries(dlw, at + 2 + points, points, "outgoing-energy densities")?;

            if interpolation == 1 {
                HistogramTable::new(outgoing, pdf).map(OutgoingEnergyTable::from)
            } else {
                TabularDistribution::new(outgoing, pdf, Interpolation::LinLin)
                    .map(OutgoingEnergyTable::from)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    ContinuousTabularLaw::new(energies, distributions)
}

/// `NR, NE, E[NE], θ[NE], NET, X[NET]`
fn general_evaporation_law(dlw: &[f64], ldat: usize) -> Result<GeneralEvaporationLaw> {
    require_single_region(dlw, ldat)?;

    let temperature = parameter_table(dlw, ldat + 1, "effective temperatures")?;
    let after = ldat + 2 + 2 * temperature.energies().len();
    let bins = count(dlw, after, "number of bin boundaries")?;

    GeneralEvaporationLaw::new(temperature, entries(dlw, after + 1, bins, "bin boundaries")?)
}

/// `NR, NE, E[NE], θ[NE], U`
fn temperature_law(dlw: &[f64], ldat: usize) -> Result<(ParameterTable, f64)> {
    require_single_region(dlw, ldat)?;

    let temperature = parameter_table(dlw, ldat + 1, "nuclear temperatures")?;
    let after = ldat + 2 + 2 * temperature.energies().len();

    Ok((temperature, entry(dlw, after, "restriction energy")?))
}

/// `NRa, NEa, Ea[NEa], a[NEa], NRb, NEb, Eb[NEb], b[NEb], U`
fn watt_law(dlw: &[f64], ldat: usize) -> Result<WattLaw> {
    require_single_region(dlw, ldat)?;

    let a_parameter = parameter_table(dlw, ldat + 1, "a parameters")?;
    let b_start = ldat + 2 + 2 * a_parameter.energies().len();

    require_single_region(dlw, b_start)?;

    let b_parameter = parameter_table(dlw, b_start + 1, "b parameters")?;
    let after = b_start + 2 + 2 * b_parameter.energies().len();

    WattLaw::new(
        a_parameter,
        b_parameter,
        entry(dlw, after, "restriction energy")?,
    )
}
