use candle_core::{Device, Tensor};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ope_confidence::{AsymptoticCI, Bootstrap, PercentileBootstrap};
use ope_core::synthetic::SyntheticBanditFeedback;
use ope_core::{Argument, NdArray, OpeInputs};
use ope_estimators::{
    DirectMethod, DoublyRobust, DoublyRobustWithShrinkage, PolicyValueEstimator,
    SelfNormalizedDoublyRobust, SwitchDoublyRobust,
};

const N_ACTIONS: usize = 10;

/// Logged feedback with a random evaluation policy
fn generate_inputs(n_rounds: usize, seed: u64) -> OpeInputs<NdArray> {
    let feedback = SyntheticBanditFeedback::generate(n_rounds, N_ACTIONS, seed);
    let dist = feedback.random_action_dist(seed + 1);
    feedback.to_inputs(dist)
}

fn to_tensor(argument: &Argument<NdArray>) -> Argument<Tensor> {
    let dev = Device::Cpu;
    match argument {
        Argument::Array(NdArray::Int(a)) => Argument::Array(
            Tensor::from_vec(a.iter().copied().collect::<Vec<i64>>(), a.shape(), &dev).unwrap(),
        ),
        Argument::Array(NdArray::Float(a)) => Argument::Array(
            Tensor::from_vec(a.iter().copied().collect::<Vec<f64>>(), a.shape(), &dev).unwrap(),
        ),
        Argument::Text(t) => Argument::Text(t.clone()),
        Argument::Null => Argument::Null,
    }
}

fn to_tensor_inputs(inputs: &OpeInputs<NdArray>) -> OpeInputs<Tensor> {
    OpeInputs {
        action_dist: to_tensor(&inputs.action_dist),
        action: inputs.action.as_ref().map(to_tensor),
        reward: inputs.reward.as_ref().map(to_tensor),
        pscore: inputs.pscore.as_ref().map(to_tensor),
        position: inputs.position.as_ref().map(to_tensor),
        estimated_rewards_by_reg_model: inputs.estimated_rewards_by_reg_model.as_ref().map(to_tensor),
    }
}

fn bench_policy_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("PolicyValue");
    let sizes = [1_000, 10_000, 100_000];

    let estimators: [(&str, &dyn PolicyValueEstimator); 5] = [
        ("dm", &DirectMethod),
        ("dr", &DoublyRobust),
        ("sndr", &SelfNormalizedDoublyRobust),
        ("switch-dr", &SwitchDoublyRobust::new(5.0).unwrap()),
        ("dr-os", &DoublyRobustWithShrinkage::new(10.0).unwrap()),
    ];

    for &size in &sizes {
        let inputs = generate_inputs(size, 42);
        for (name, estimator) in estimators {
            group.bench_with_input(BenchmarkId::new(name, size), &inputs, |b, inputs| {
                b.iter(|| estimator.estimate_policy_value(black_box(inputs)))
            });
        }
    }

    group.finish();
}

fn bench_tensor_backend(c: &mut Criterion) {
    let mut group = c.benchmark_group("TensorBackend");
    let sizes = [1_000, 10_000, 100_000];

    for &size in &sizes {
        let inputs = to_tensor_inputs(&generate_inputs(size, 42));

        group.bench_with_input(BenchmarkId::new("dr", size), &inputs, |b, inputs| {
            b.iter(|| DoublyRobust.estimate_policy_value_tensor(black_box(inputs)))
        });

        let shrinkage = DoublyRobustWithShrinkage::new(10.0).unwrap();
        group.bench_with_input(BenchmarkId::new("dr-os", size), &inputs, |b, inputs| {
            b.iter(|| shrinkage.estimate_policy_value_tensor(black_box(inputs)))
        });
    }

    group.finish();
}

fn bench_interval(c: &mut Criterion) {
    let mut group = c.benchmark_group("Interval");
    let inputs = generate_inputs(10_000, 7);
    let dr = DoublyRobust::new();

    for n_resamples in [100, 1_000] {
        let bootstrap = Bootstrap::new(PercentileBootstrap)
            .with_resamples(n_resamples)
            .with_seed(12345);
        group.bench_with_input(
            BenchmarkId::new("bootstrap", n_resamples),
            &inputs,
            |b, inputs| b.iter(|| dr.estimate_interval(black_box(inputs), &bootstrap)),
        );
    }

    let asymptotic = AsymptoticCI::normal(0.95).unwrap();
    group.bench_function("asymptotic", |b| {
        b.iter(|| dr.estimate_interval(black_box(&inputs), &asymptotic))
    });

    group.finish();
}

criterion_group!(benches, bench_policy_value, bench_tensor_backend, bench_interval);
criterion_main!(benches);
