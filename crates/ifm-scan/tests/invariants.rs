use ifm_backend::LocalSampler;
use ifm_core::CellStatus;
use ifm_scan::{RunConfig, Survey, SurveyState};

/// Walks a full survey one probe at a time, checking the run-wide
/// invariants after every single step.
#[test]
fn invariants_hold_after_every_probe() {
    let mut config = RunConfig::new(5, 6);
    config.seed_policy.master_seed = 91;
    let cell_count = config.cell_count();
    let target_count = config.grid.target_count;

    let mut survey = Survey::new(&config).unwrap();
    let mut sampler = LocalSampler::from_seed(17);
    let mut probes_seen = 0u64;

    while let Some(_record) = survey.step(&mut sampler).unwrap() {
        probes_seen += 1;
        assert_eq!(survey.metrics().probes_executed(), probes_seen);

        let counts = survey.results().counts();
        assert_eq!(
            counts.clear + counts.hit + counts.unknown,
            cell_count,
            "status counts must partition the board"
        );
        assert_eq!(counts.clear, survey.metrics().clear_confirmed());
        assert_eq!(counts.hit, survey.metrics().targets_hit());
        assert!(counts.clear <= cell_count - target_count);

        // No false classification is possible by construction.
        for coord in survey.targets().board().coords() {
            match survey.results().status(coord) {
                CellStatus::Hit => assert!(survey.targets().has_target(coord)),
                CellStatus::Clear => assert!(!survey.targets().has_target(coord)),
                CellStatus::Unknown => {}
            }
        }
    }

    assert_eq!(survey.state(), SurveyState::Done);
    assert!(survey
        .metrics()
        .satisfied(target_count, cell_count));
    // Termination means every truly-clear cell was confirmed.
    assert_eq!(
        survey.metrics().clear_confirmed(),
        cell_count - target_count
    );
    assert_eq!(
        survey.metrics().targets_located(target_count) + survey.metrics().targets_hit(),
        target_count
    );
}
