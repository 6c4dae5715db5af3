//! Property tests over the logic units

use cyber_academy::config::{DamagePolicy, DefenseConfig};
use cyber_academy::game::cipher::{self, CipherMethod, Direction};
use cyber_academy::game::defense::DefenseSimulator;
use cyber_academy::game::password::{self, StrengthLabel, CRITERIA_COUNT};
use cyber_academy::game::random::RngSource;
use proptest::prelude::*;

proptest! {
    #[test]
    fn rot13_is_its_own_inverse(text in "\\PC*") {
        prop_assert_eq!(cipher::rot13(&cipher::rot13(&text)), text);
    }

    #[test]
    fn caesar_decode_undoes_encode(text in "\\PC*", shift in 1i32..=25) {
        let method = CipherMethod::Caesar(shift);
        let encoded = cipher::transform(&text, method, Direction::Encode).unwrap();
        let decoded = cipher::transform(&encoded, method, Direction::Decode).unwrap();
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn caesar_shift_wraps_modulo_26(text in "[a-zA-Z ]*", shift in -100i32..100) {
        prop_assert_eq!(cipher::caesar(&text, shift), cipher::caesar(&text, shift + 26));
    }

    #[test]
    fn base64_decode_undoes_encode(text in "\\PC*") {
        let encoded = cipher::base64_encode(&text);
        prop_assert_eq!(cipher::base64_decode(&encoded).unwrap(), text);
    }

    #[test]
    fn password_score_is_bounded_and_consistent(pw in "\\PC{0,40}") {
        let result = password::evaluate(&pw);
        prop_assert!(result.score <= CRITERIA_COUNT);
        prop_assert_eq!(result.criteria.len(), CRITERIA_COUNT as usize);
        prop_assert_eq!(result.criteria.iter().filter(|c| c.met).count(), result.score as usize);
        prop_assert_eq!(result.label, StrengthLabel::from_score(result.score));
        prop_assert_eq!(result.xp, result.label.xp());
        prop_assert_eq!(password::evaluate(&pw), result);
    }

    #[test]
    fn simulator_invariants_hold(
        seed in any::<u64>(),
        ticks in 1u32..200,
        classic in any::<bool>(),
        block_every in 1u32..5,
    ) {
        let config = if classic { DefenseConfig::classic() } else { DefenseConfig::default() };
        prop_assert_eq!(
            config.damage_policy,
            if classic { DamagePolicy::EveryTick } else { DamagePolicy::OncePerEvent }
        );
        let window_size = config.window_size;
        let mut sim = DefenseSimulator::new(config);
        sim.start();
        let mut rng = RngSource::seeded(seed);
        let mut last_level = 1;

        for n in 1..=ticks {
            let report = sim.tick(&mut rng).unwrap();
            prop_assert_eq!(report.elapsed_seconds, n);
            if n % block_every == 0 {
                for id in sim.blockable() {
                    sim.block(id);
                }
            }

            let session = sim.session().unwrap();
            prop_assert!((0.0..=100.0).contains(&session.shield_strength));
            prop_assert!(session.level >= last_level);
            prop_assert!(sim.attacks().count() <= window_size);
            prop_assert!((0.0..=100.0).contains(&session.efficiency()));
            last_level = session.level;
        }
    }
}
