use criterion::{criterion_group, criterion_main, Criterion};
use ifm_backend::LocalSampler;
use ifm_scan::{determinism, run, RunConfig};

fn bench_survey(c: &mut Criterion) {
    let mut config = RunConfig::new(6, 6);
    config.seed_policy.master_seed = 1717;
    config.output.run_directory = None;
    let sampler_seed = determinism::sampler_seed(config.seed_policy.master_seed);

    c.bench_function("survey_6x6_6targets", |b| {
        b.iter(|| {
            let mut sampler = LocalSampler::from_seed(sampler_seed);
            run(&config, &mut sampler).unwrap()
        })
    });
}

criterion_group!(benches, bench_survey);
criterion_main!(benches);
