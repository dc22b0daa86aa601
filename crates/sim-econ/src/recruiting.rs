//! Candidate market generation.

use crate::pricing::{base_skill, hiring_fee, noisy_skill, salary};
use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use sim_core::{EconomyConfig, NameTable, Profile, ReferenceData, Sex, Specialty, WorldState};

/// A generated candidate before it is given an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateOffer {
    pub profile: Profile,
    pub hiring_fee: i64,
}

/// Result of one recruitment report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecruitmentReport {
    /// Replaces the whole candidate pool.
    pub candidates: Vec<CandidateOffer>,
    pub next_refresh_date: NaiveDate,
}

fn random_name<R: Rng + ?Sized>(rng: &mut R, names: &NameTable) -> String {
    let first = names.first.choose(rng).map_or("", String::as_str);
    let last = names.last.choose(rng).map_or("", String::as_str);
    format!("{first} {last}")
}

/// Draw a fresh candidate pool sized by the HR departments of `world`.
///
/// Returns `None` when the company has no HR department; the refresh timer then
/// stays due.
pub fn generate_candidates<R: Rng + ?Sized>(
    world: &WorldState,
    data: &ReferenceData,
    cfg: &EconomyConfig,
    rng: &mut R,
) -> Option<RecruitmentReport> {
    let levels: Vec<u32> = world
        .buildings
        .iter()
        .filter_map(|b| b.as_hr_department())
        .map(|hr| hr.recruitment_level)
        .collect();
    let max_level = *levels.iter().max()?;
    let count: u32 = levels.iter().sum();

    let base = base_skill(max_level, world.company_value);
    let candidates = (0..count)
        .map(|_| {
            let skill_level = noisy_skill(base, rng.gen_range(-0.4..0.6));
            let pay = salary(skill_level, world.company_value);
            let specialty = Specialty::ALL[rng.gen_range(0..Specialty::ALL.len())];
            let profile = Profile {
                name: random_name(rng, data.names()),
                age: rng.gen_range(22..=60),
                sex: if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female },
                specialty,
                skill_level,
                salary: pay,
            };
            CandidateOffer {
                hiring_fee: hiring_fee(pay, skill_level),
                profile,
            }
        })
        .collect();

    Some(RecruitmentReport {
        candidates,
        next_refresh_date: world.date + Days::new(u64::from(cfg.candidate_refresh_days)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sim_core::{BuildingKind, BuildingStats};

    fn world(hr_levels: &[u32]) -> (ReferenceData, WorldState) {
        let data = ReferenceData::builtin().unwrap();
        let mut world =
            WorldState::new_game(&data, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        for &level in hr_levels {
            let id = world.next_building_id(BuildingKind::HrDepartment);
            let mut hr = data
                .building(BuildingKind::HrDepartment)
                .instantiate(BuildingKind::HrDepartment, id);
            hr.level = level;
            hr.apply_stats(&BuildingStats {
                recruitment_level: Some(level),
                ..Default::default()
            });
            world.buildings.push(hr);
        }
        (data, world)
    }

    #[test]
    fn no_hr_means_no_report() {
        let (data, world) = world(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generate_candidates(&world, &data, &EconomyConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn pool_size_is_total_recruitment_level() {
        let (data, world) = world(&[1, 3]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let report =
            generate_candidates(&world, &data, &EconomyConfig::default(), &mut rng).unwrap();
        assert_eq!(report.candidates.len(), 4);
        assert_eq!(report.next_refresh_date, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
    }

    #[test]
    fn candidates_follow_the_pay_curve() {
        let (data, world) = world(&[2]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let report =
                generate_candidates(&world, &data, &EconomyConfig::default(), &mut rng).unwrap();
            for c in report.candidates {
                let p = &c.profile;
                assert!((1..=100).contains(&p.skill_level));
                assert!((22..=60).contains(&p.age));
                assert_eq!(p.salary, salary(p.skill_level, world.company_value));
                assert_eq!(c.hiring_fee, hiring_fee(p.salary, p.skill_level));
                assert!(p.name.contains(' '));
                // base 18.2, noise spans [-8, 12)
                assert!((10..=31).contains(&p.skill_level), "{}", p.skill_level);
            }
        }
    }
}
