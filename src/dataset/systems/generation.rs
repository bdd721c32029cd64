//! Ward and district generation

use tracing::debug;

use crate::core::random::RandomSource;
use crate::core::types::{FiscalYear, RiskLevel};
use crate::dataset::district::{DistrictData, DistrictDescriptor};
use crate::dataset::scheme::{leading_schemes, year_total, BudgetScheme};
use crate::dataset::ward::{governance_score, ward_id, SchemeAllocation, Ward};

/// A leading scheme's nominal per-district budget
#[derive(Clone, Debug, PartialEq)]
pub struct SchemeShare {
    pub name: String,
    pub share: f64,
}

/// Budget figures one district draws on for one fiscal year
///
/// Shares are split evenly across districts, not weighted by population.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationContext {
    pub district_share: f64,
    pub scheme_shares: Vec<SchemeShare>,
}

impl AllocationContext {
    pub fn for_year(schemes: &[BudgetScheme], year: FiscalYear, district_count: usize) -> Self {
        let districts = district_count.max(1) as f64;
        Self {
            district_share: year_total(schemes, year) as f64 / districts,
            scheme_shares: leading_schemes(schemes)
                .iter()
                .map(|s| SchemeShare {
                    name: s.name.clone(),
                    share: s.budget_for(year) as f64 / districts,
                })
                .collect(),
        }
    }
}

fn round_u64(value: f64) -> u64 {
    value.round() as u64
}

fn round_percent(value: f64) -> u32 {
    (value * 100.0).round() as u32
}

/// Generate one district's wards for one year
///
/// Draw order: one population jitter per ward, then per ward the utilization
/// factor, complaint ratio, resolution rate, SLA score and one perturbation
/// per leading scheme.
pub fn generate_wards<R: RandomSource + ?Sized>(
    district: &DistrictDescriptor,
    context: &AllocationContext,
    rng: &mut R,
) -> Vec<Ward> {
    let mean_population = district.mean_ward_population();

    let populations: Vec<u64> = (0..district.wards)
        .map(|_| round_u64(mean_population * rng.draw_in(0.8, 0.4)))
        .collect();
    let total_population: u64 = populations.iter().sum();

    populations
        .iter()
        .enumerate()
        .map(|(index, &population)| {
            let population_ratio = if total_population == 0 {
                0.0
            } else {
                population as f64 / total_population as f64
            };
            let allocated = round_u64(context.district_share * population_ratio);

            // Utilization: 55-95%
            let util_factor = rng.draw_in(0.55, 0.40);
            let utilized = round_u64(allocated as f64 * util_factor);
            let utilization_rate = if allocated == 0 {
                0
            } else {
                round_percent(utilized as f64 / allocated as f64)
            };

            // Complaints: 1-5% of residents
            let complaint_ratio = rng.draw_in(0.01, 0.04);
            let complaint_count = round_u64(population as f64 * complaint_ratio);
            let resolution_rate = round_percent(rng.draw_in(0.5, 0.45));
            let sla_score = round_percent(rng.draw_in(0.55, 0.40));

            let score = governance_score(utilization_rate, sla_score, resolution_rate);

            let schemes = context
                .scheme_shares
                .iter()
                .map(|scheme| {
                    let scheme_allocated = round_u64(scheme.share * population_ratio);
                    let scheme_utilized =
                        round_u64(scheme_allocated as f64 * util_factor * rng.draw_in(0.9, 0.2));
                    SchemeAllocation {
                        name: scheme.name.clone(),
                        allocated: scheme_allocated,
                        utilized: scheme_utilized.min(scheme_allocated),
                    }
                })
                .collect();

            Ward {
                id: ward_id(&district.name, index + 1),
                name: format!("Ward {}", index + 1),
                district: district.name.clone(),
                population,
                fund_allocated: allocated,
                fund_utilized: utilized,
                utilization_rate,
                complaint_count,
                resolution_rate,
                sla_score,
                governance_score: score,
                risk_level: RiskLevel::from_score(score),
                schemes,
            }
        })
        .collect()
}

/// Generate every district for one year, in the given district order
pub fn generate_districts<R: RandomSource + ?Sized>(
    districts: &[DistrictDescriptor],
    schemes: &[BudgetScheme],
    year: FiscalYear,
    rng: &mut R,
) -> Vec<DistrictData> {
    let context = AllocationContext::for_year(schemes, year, districts.len());

    districts
        .iter()
        .map(|descriptor| {
            let wards = generate_wards(descriptor, &context, rng);
            let data = DistrictData::aggregate(descriptor, wards);
            debug!(
                district = %data.name,
                %year,
                wards = data.ward_count,
                allocated = data.total_allocated,
                avg_governance = data.avg_governance_score,
                "Generated district"
            );
            data
        })
        .collect()
}
