use std::convert::Infallible;

use approx::assert_abs_diff_eq;
use descent_core::{
    ApproxHessian, FiniteDifference, GradientOnly, Joint, Objective, ValueAndGradient, ValueOnly,
    WithHessian, vector,
};

use crate::{
    direction::{ConjugateGradient, Direction, Formula, Newton, SteepestDescent},
    line_search::{Backtracking, Exact, Goldstein, StrongWolfe},
    stop::Criteria,
};

use super::{
    Config, Error, Event, Status, minimize, minimize_newton, minimize_unobserved, minimize_with,
};

/// The n-dimensional Rosenbrock function, minimized at `[1, …, 1]`.
fn rosenbrock<const N: usize>(x: &[f64; N]) -> Result<f64, Infallible> {
    Ok((0..N.saturating_sub(1))
        .map(|i| 100.0 * (x[i + 1] - x[i] * x[i]).powi(2) + (1.0 - x[i]).powi(2))
        .sum())
}

fn rosenbrock_gradient<const N: usize>(x: &[f64; N]) -> Result<[f64; N], Infallible> {
    let mut gradient = [0.0; N];
    for i in 0..N.saturating_sub(1) {
        let t = x[i + 1] - x[i] * x[i];
        gradient[i] += -400.0 * x[i] * t - 2.0 * (1.0 - x[i]);
        gradient[i + 1] += 200.0 * t;
    }
    Ok(gradient)
}

fn rosenbrock_objective<const N: usize>() -> impl Objective<N, Error = Infallible> {
    ValueAndGradient::new(rosenbrock::<N>, rosenbrock_gradient::<N>)
}

const A: [[f64; 3]; 3] = [[1.0, 0.2, 0.0], [0.2, 4.0, 0.5], [0.0, 0.5, 10.0]];
const MINIMUM: [f64; 3] = [1.0, -1.0, 0.5];

/// `½(x - m)ᵀA(x - m)` with `A = diag(1, 4, 10) + offsets`, minimized at
/// `m = [1, -1, 0.5]`.
fn quadratic() -> impl Objective<3, Error = Infallible> {
    Joint::new(|x: &[f64; 3]| {
        let e = vector::sub(x, &MINIMUM);
        let mut ae = [0.0; 3];
        for i in 0..3 {
            ae[i] = (0..3).map(|j| A[i][j] * e[j]).sum();
        }
        Ok::<_, Infallible>((0.5 * vector::dot(&e, &ae), ae))
    })
}

fn tight() -> Criteria {
    Criteria::new(2000, 1e-14, 1e-14, 1e-8).unwrap()
}

fn assert_near<const N: usize>(x: &[f64; N], expected: &[f64; N], epsilon: f64) {
    for i in 0..N {
        assert_abs_diff_eq!(x[i], expected[i], epsilon = epsilon);
    }
}

#[test]
fn bfgs_minimizes_rosenbrock() {
    let config = Config::bfgs().with_criteria(tight());

    let solution = minimize_unobserved(&rosenbrock_objective(), [-1.2, 1.0], &config).unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0, 1.0], 1e-6);
    assert!(solution.value < 1e-12);
}

#[test]
fn lbfgs_minimizes_rosenbrock_in_four_dimensions() {
    let config = Config::lbfgs().with_criteria(tight());

    let solution =
        minimize_unobserved(&rosenbrock_objective(), [-1.2, 1.0, -1.2, 1.0], &config).unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0; 4], 1e-5);
}

#[test]
fn conjugate_gradient_minimizes_rosenbrock() {
    let config = Config::conjugate_gradient().with_criteria(tight());

    let solution = minimize_unobserved(&rosenbrock_objective(), [-1.2, 1.0], &config).unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0, 1.0], 1e-4);
}

#[test]
fn conjugate_gradient_reaches_gradient_tolerance_in_ten_dimensions() {
    let criteria = Criteria::new(10_000, 1e-8, 1e-8, 1e-4).unwrap();
    let config = Config::conjugate_gradient().with_criteria(criteria);

    let solution = minimize_unobserved(&rosenbrock_objective(), [5.0; 10], &config).unwrap();

    assert_eq!(solution.status, Status::ConvergedG);
    assert!(vector::norm(&solution.gradient) <= 1e-4);
    assert_near(&solution.x, &[1.0; 10], 1e-3);
}

#[test]
fn every_cg_formula_minimizes_quadratic() {
    for formula in [
        Formula::FR,
        Formula::PR,
        Formula::PRAbs,
        Formula::PRPlus,
        Formula::HS,
        Formula::DY,
        Formula::HZ,
        Formula::FRPR,
    ] {
        let config = Config::conjugate_gradient()
            .with_direction(ConjugateGradient::new(formula, 0.1).unwrap())
            .with_criteria(tight());

        let solution = minimize_unobserved(&quadratic(), [0.0; 3], &config).unwrap();

        assert!(solution.status.is_converged(), "{formula:?}: {:?}", solution.status);
        assert_near(&solution.x, &[1.0, -1.0, 0.5], 1e-6);
    }
}

#[test]
fn conjugate_gradient_with_exact_line_search_is_finite() {
    let config = Config::conjugate_gradient()
        .with_line_search(Exact::default())
        .with_direction(ConjugateGradient::new(Formula::FR, 0.1).unwrap())
        .with_criteria(Criteria::new(50, 0.0, 0.0, 1e-6).unwrap());

    let solution = minimize_unobserved(&quadratic(), [0.0; 3], &config).unwrap();

    assert_eq!(solution.status, Status::ConvergedG);
    assert!(solution.iters <= 10, "took {} iterations", solution.iters);
}

#[test]
fn gradient_descent_minimizes_quadratic() {
    let config = Config::gradient_descent().with_criteria(tight());

    let solution = minimize_unobserved(&quadratic(), [3.0, 3.0, 3.0], &config).unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0, -1.0, 0.5], 1e-5);
}

#[test]
fn alternative_line_searches() {
    let configs = [
        Config::gradient_descent().with_line_search(Backtracking::default()),
        Config::bfgs().with_line_search(Backtracking::default()),
        Config::bfgs().with_line_search(Goldstein::default()),
        Config::lbfgs().with_line_search(Exact::default()),
    ];

    for config in configs {
        let config = config.with_criteria(tight());
        let solution = minimize_unobserved(&quadratic(), [2.0, 0.0, -1.0], &config).unwrap();

        assert!(solution.status.is_converged(), "{config:?}: {:?}", solution.status);
        assert_near(&solution.x, &[1.0, -1.0, 0.5], 1e-5);
    }
}

#[test]
fn central_difference_gradient() {
    let config = Config::bfgs().with_criteria(Criteria::new(500, 1e-14, 1e-14, 1e-5).unwrap());
    let objective = ValueOnly::new(rosenbrock::<2>);

    let solution = minimize_unobserved(&objective, [-1.2, 1.0], &config).unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0, 1.0], 1e-3);
}

#[test]
fn forward_difference_gradient() {
    let config = Config::bfgs().with_criteria(Criteria::new(500, 1e-14, 1e-14, 1e-3).unwrap());
    let objective =
        ValueOnly::new(rosenbrock::<2>).with_finite_difference(FiniteDifference::forward());

    let solution = minimize_unobserved(&objective, [-1.2, 1.0], &config).unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0, 1.0], 1e-2);
}

#[test]
fn gradient_only_objective() {
    let objective = GradientOnly::new(rosenbrock_gradient::<2>).with_anchor([-1.2, 1.0]);
    let config = Config::bfgs().with_criteria(Criteria::new(500, 0.0, 1e-12, 1e-5).unwrap());

    let solution = minimize_unobserved(&objective, [-1.2, 1.0], &config).unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0, 1.0], 1e-4);
    // Values are measured from the anchor, where the function is 24.2.
    assert_abs_diff_eq!(solution.value, -24.2, epsilon = 1e-6);
}

#[test]
fn newton_solves_a_quadratic_in_one_step() {
    let objective = WithHessian::new(quadratic(), |_: &[f64; 3]| Ok::<_, Infallible>(A));

    let solution = minimize_newton(
        &objective,
        [4.0, 2.0, -3.0],
        &Newton::default(),
        &mut StrongWolfe::default(),
        &tight(),
        (),
    )
    .unwrap();

    assert_eq!(solution.status, Status::ConvergedG);
    assert_eq!(solution.iters, 1);
    assert_near(&solution.x, &MINIMUM, 1e-12);
}

#[test]
fn newton_with_approximate_hessian_minimizes_rosenbrock() {
    let objective = ApproxHessian::new(rosenbrock_objective::<2>());
    let mut stepped = 0;
    let observer = |event: &Event<'_, 2>| {
        if matches!(event, Event::Stepped { .. }) {
            stepped += 1;
        }
    };

    let solution = minimize_newton(
        &objective,
        [-1.2, 1.0],
        &Newton::default(),
        &mut StrongWolfe::default(),
        &tight(),
        observer,
    )
    .unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_near(&solution.x, &[1.0, 1.0], 1e-6);
    assert_eq!(stepped, solution.iters);
    assert!(solution.iters < 100, "took {} iterations", solution.iters);
}

#[test]
fn newton_reports_hessian_errors() {
    #[derive(Debug, thiserror::Error)]
    #[error("no Hessian available")]
    struct NoHessian;

    let objective = WithHessian::new(
        ValueAndGradient::new(
            |x: &[f64; 1]| Ok::<_, NoHessian>(x[0] * x[0]),
            |x: &[f64; 1]| Ok::<_, NoHessian>([2.0 * x[0]]),
        ),
        |_: &[f64; 1]| Err::<[[f64; 1]; 1], _>(NoHessian),
    );

    let error = minimize_newton(
        &objective,
        [3.0],
        &Newton::default(),
        &mut StrongWolfe::default(),
        &Criteria::default(),
        (),
    )
    .unwrap_err();

    match error {
        Error::Objective(source) => assert!(source.downcast_ref::<NoHessian>().is_some()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repeated_runs_are_identical() {
    let config = Config::bfgs();
    let objective = rosenbrock_objective();

    let first = minimize_unobserved(&objective, [-1.2, 1.0], &config).unwrap();
    let second = minimize_unobserved(&objective, [-1.2, 1.0], &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(config, Config::bfgs());
}

#[test]
fn observer_sees_every_iteration() {
    let mut events = Vec::new();
    let observer = |event: &Event<'_, 2>| {
        let kind = match event {
            Event::Started { .. } => "started",
            Event::Stepped { .. } => "stepped",
            Event::Finished { .. } => "finished",
        };
        events.push((kind, event.iter(), event.value()));
    };

    let solution = minimize(
        &rosenbrock_objective(),
        [-1.2, 1.0],
        &Config::bfgs(),
        observer,
    )
    .unwrap();

    assert_eq!(events.len(), solution.iters + 2);
    assert_eq!((events[0].0, events[0].1), ("started", 0));
    assert_abs_diff_eq!(events[0].2, 24.2, epsilon = 1e-12);
    assert_eq!(events.last(), Some(&("finished", solution.iters, solution.value)));

    for (i, (kind, iter, _)) in events[1..=solution.iters].iter().enumerate() {
        assert_eq!(*kind, "stepped");
        assert_eq!(*iter, i + 1);
    }
}

#[test]
fn stepped_events_carry_status() {
    let mut statuses = Vec::new();
    let observer = |event: &Event<'_, 2>| {
        if let Event::Stepped { status, step, .. } = event {
            assert!(step.alpha > 0.0);
            statuses.push(*status);
        }
    };

    let config = Config::bfgs().with_criteria(Criteria::default().with_max_iters(5));
    minimize(&rosenbrock_objective(), [-1.2, 1.0], &config, observer).unwrap();

    assert_eq!(statuses.len(), 5);
    assert!(statuses[..4].iter().all(|status| status.is_running()));
    assert_eq!(statuses[4], Status::MaxIterations);
}

#[test]
fn starting_at_minimum_takes_no_steps() {
    let mut stepped = 0;
    let observer = |event: &Event<'_, 2>| {
        if matches!(event, Event::Stepped { .. }) {
            stepped += 1;
        }
    };

    let solution =
        minimize(&rosenbrock_objective(), [1.0, 1.0], &Config::bfgs(), observer).unwrap();

    assert_eq!(solution.status, Status::ConvergedG);
    assert_eq!(solution.iters, 0);
    assert_eq!(solution.x, [1.0, 1.0]);
    assert_eq!(stepped, 0);
}

#[test]
fn iteration_limit_returns_last_iterate() {
    let config = Config::gradient_descent().with_criteria(tight().with_max_iters(3));

    let solution = minimize_unobserved(&rosenbrock_objective(), [-1.2, 1.0], &config).unwrap();

    assert_eq!(solution.status, Status::MaxIterations);
    assert_eq!(solution.iters, 3);
    assert!(solution.value < 24.2);
    assert_eq!(solution.value, rosenbrock(&solution.x).unwrap());
}

#[test]
fn objective_errors_propagate() {
    #[derive(Debug, thiserror::Error)]
    #[error("negative input")]
    struct NegativeInput;

    let objective = ValueAndGradient::new(
        |x: &[f64; 1]| {
            if x[0] < 0.0 {
                Err(NegativeInput)
            } else {
                Ok((x[0] + 5.0).powi(2))
            }
        },
        |x: &[f64; 1]| Ok::<_, NegativeInput>([2.0 * (x[0] + 5.0)]),
    );

    let error = minimize_unobserved(&objective, [1.0], &Config::bfgs()).unwrap_err();

    match error {
        Error::Objective(source) => assert!(source.downcast_ref::<NegativeInput>().is_some()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_finite_start_is_rejected() {
    let objective = ValueAndGradient::new(
        |x: &[f64; 1]| Ok::<_, Infallible>(x[0].ln()),
        |x: &[f64; 1]| Ok::<_, Infallible>([1.0 / x[0]]),
    );

    let error = minimize_unobserved(&objective, [-1.0], &Config::bfgs()).unwrap_err();
    assert!(matches!(error, Error::NonFiniteStart));
}

/// Proposes steepest descent on initialization and uphill afterwards.
#[derive(Debug, Default)]
struct Uphill {
    initializations: usize,
}

impl Direction for Uphill {
    fn initialize<const N: usize>(&mut self, _x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        self.initializations += 1;
        vector::neg(gradient)
    }

    fn next<const N: usize>(&mut self, _x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        *gradient
    }
}

#[test]
fn non_descent_directions_are_reset() {
    let mut direction = Uphill::default();
    let mut line_search = StrongWolfe::default();

    let solution = minimize_with(
        &quadratic(),
        [0.0; 3],
        &mut direction,
        &mut line_search,
        &tight(),
        (),
    )
    .unwrap();

    assert!(solution.status.is_converged(), "{:?}", solution.status);
    assert_eq!(direction.initializations, solution.iters);
}

#[test]
fn caller_owned_strategies_match_config() {
    let mut direction = SteepestDescent;
    let mut line_search = Backtracking::default();
    let criteria = tight();

    let owned = minimize_with(
        &quadratic(),
        [1.0, 2.0, 3.0],
        &mut direction,
        &mut line_search,
        &criteria,
        (),
    )
    .unwrap();

    let config = Config::gradient_descent()
        .with_line_search(Backtracking::default())
        .with_criteria(criteria);
    let configured = minimize_unobserved(&quadratic(), [1.0, 2.0, 3.0], &config).unwrap();

    assert_eq!(owned, configured);
}
