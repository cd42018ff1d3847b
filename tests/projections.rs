use approx::assert_abs_diff_eq;
use ndarray::prelude::*;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use proptest::prelude::*;

use sparse_prox::{Projection, ProjectionSet};

fn sets() -> Vec<ProjectionSet<f64>> {
    let mut sets = vec![ProjectionSet::non_negative_orthant()];
    for &a in &[0.5, 1., 5.] {
        sets.push(ProjectionSet::simplex(a).unwrap());
        sets.push(ProjectionSet::l1_ball(a).unwrap());
        sets.push(ProjectionSet::l2_ball(a).unwrap());
        sets.push(ProjectionSet::linf_ball(a).unwrap());
    }
    sets
}

/// Normal points of growing scale, the first one being zero.
fn points(rng: &mut StdRng) -> Vec<Array1<f64>> {
    (0..20)
        .map(|i| Array1::random_using(100, StandardNormal, &mut *rng) * i as f64)
        .collect()
}

fn distance(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    (x - y).mapv(|v| v * v).sum().sqrt()
}

/// Membership computed straight from the definition of each set.
fn in_set(set: &ProjectionSet<f64>, x: &Array1<f64>) -> bool {
    let nonnegative = x.iter().all(|&v| v >= 0.);
    match set {
        ProjectionSet::NonNegativeOrthant(_) => nonnegative,
        ProjectionSet::Simplex(s) => (x.sum() - s.size()).abs() < 1e-8 && nonnegative,
        ProjectionSet::L1Ball(b) => x.mapv(f64::abs).sum() - b.radius() < 1e-10,
        ProjectionSet::L2Ball(b) => x.dot(x).sqrt() - b.radius() < 1e-10,
        ProjectionSet::LInfBall(b) => {
            x.iter().fold(0f64, |acc, v| acc.max(v.abs())) - b.radius() < 1e-10
        }
    }
}

#[test]
fn projects_into_the_set() {
    let mut rng = StdRng::seed_from_u64(0);
    for x in points(&mut rng) {
        for set in sets() {
            let y = set.project(x.view()).unwrap();
            assert!(set.is_feasible(y.view()), "{:?} infeasible for {:?}", y, set);
        }
    }
}

#[test]
fn single_precision_outputs_are_feasible() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut sets: Vec<ProjectionSet<f32>> = vec![ProjectionSet::non_negative_orthant()];
    for &a in &[0.5f32, 1., 5.] {
        sets.push(ProjectionSet::simplex(a).unwrap());
        sets.push(ProjectionSet::l1_ball(a).unwrap());
        sets.push(ProjectionSet::l2_ball(a).unwrap());
        sets.push(ProjectionSet::linf_ball(a).unwrap());
    }
    for _ in 0..100 {
        let x: Array1<f32> = Array1::random_using(50, StandardNormal, &mut rng) * 5.;
        for set in &sets {
            let y = set.project(x.view()).unwrap();
            assert!(set.is_feasible(y.view()), "{:?} infeasible for {:?}", y, set);
        }
    }
}

#[test]
fn projection_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(1);
    for x in points(&mut rng) {
        for set in sets() {
            let y = set.project(x.view()).unwrap();
            let z = set.project(y.view()).unwrap();
            assert_abs_diff_eq!(y, z, epsilon = 1e-9);
        }
    }
}

#[test]
fn projects_to_nearest_point() {
    let mut rng = StdRng::seed_from_u64(2);
    for x in points(&mut rng) {
        for set in sets() {
            let y = set.project(x.view()).unwrap();
            let best = distance(&x, &y);
            for _ in 0..100 {
                let noise: Array1<f64> =
                    Array1::random_using(x.len(), StandardNormal, &mut rng) * 0.1;
                // pulling the perturbation back into the set keeps the
                // competitor feasible even for the simplex
                let other = set.project((&y + &noise).view()).unwrap();
                assert!(set.is_feasible(other.view()));
                assert!(best <= distance(&x, &other) + 1e-9);

                let raw = &y + &noise;
                if set.is_feasible(raw.view()) {
                    assert!(best <= distance(&x, &raw) + 1e-9);
                }
            }
        }
    }
}

#[test]
fn feasibility_agrees_with_definition() {
    let mut rng = StdRng::seed_from_u64(3);
    for x in points(&mut rng) {
        for set in sets() {
            let y = set.project(x.view()).unwrap();
            assert_eq!(in_set(&set, &x), set.is_feasible(x.view()));
            assert_eq!(in_set(&set, &y), set.is_feasible(y.view()));
        }
    }
}

#[test]
fn interior_points_are_unchanged() {
    let x = array![0.1, -0.2, 0.05];
    for &a in &[0.5, 1., 5.] {
        for set in &[
            ProjectionSet::l1_ball(a).unwrap(),
            ProjectionSet::l2_ball(a).unwrap(),
            ProjectionSet::linf_ball(a).unwrap(),
        ] {
            assert_eq!(set.project(x.view()).unwrap(), x);
        }
    }
}

#[test]
fn literal_scenarios() {
    let y = ProjectionSet::l1_ball(2.)
        .unwrap()
        .project(array![3., -4.].view())
        .unwrap();
    assert_abs_diff_eq!(y.mapv(f64::abs).sum(), 2., epsilon = 1e-12);
    assert!(y[0] > 0. && y[1] < 0.);

    let y = ProjectionSet::simplex(1.)
        .unwrap()
        .project(array![2., 2., -1.].view())
        .unwrap();
    assert_abs_diff_eq!(y, array![0.5, 0.5, 0.], epsilon = 1e-12);

    let y = ProjectionSet::linf_ball(2.)
        .unwrap()
        .project(array![5., -1., 0.2].view())
        .unwrap();
    assert_abs_diff_eq!(y, array![2., -1., 0.2], epsilon = 1e-12);
}

proptest! {
    #[test]
    fn simplex_output_sums_to_size(
        x in prop::collection::vec(-50.0f64..50.0, 1..60),
        size in 0.1f64..10.0,
    ) {
        let set = ProjectionSet::simplex(size).unwrap();
        let y = set.project(Array1::from(x).view()).unwrap();
        prop_assert!((y.sum() - size).abs() < 1e-9);
        prop_assert!(y.iter().all(|&v| v >= 0.));
    }

    #[test]
    fn l1_ball_keeps_signs(
        x in prop::collection::vec(-50.0f64..50.0, 1..60),
        radius in 0.1f64..10.0,
    ) {
        let x = Array1::from(x);
        let set = ProjectionSet::l1_ball(radius).unwrap();
        let y = set.project(x.view()).unwrap();
        prop_assert!(set.is_feasible(y.view()));
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            prop_assert!(yi == 0. || xi.signum() == yi.signum());
            prop_assert!(yi.abs() <= xi.abs());
        }
    }

    #[test]
    fn balls_are_nested(
        x in prop::collection::vec(-50.0f64..50.0, 1..60),
        radius in 0.1f64..10.0,
    ) {
        // ||.||_inf <= ||.||_2 <= ||.||_1, so each projection lands
        // in the looser balls too
        let x = Array1::from(x);
        let l1 = ProjectionSet::l1_ball(radius).unwrap();
        let l2 = ProjectionSet::l2_ball(radius).unwrap();
        let linf = ProjectionSet::linf_ball(radius).unwrap();

        let y = l1.project(x.view()).unwrap();
        prop_assert!(l2.is_feasible(y.view()) && linf.is_feasible(y.view()));
        let y = l2.project(x.view()).unwrap();
        prop_assert!(linf.is_feasible(y.view()));
    }
}
