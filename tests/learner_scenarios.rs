//! End-to-end scenarios exercising the three learners through the public
//! surface only: repeated `select` → external reward → `update`.

use multiarm::{BernoulliThompson, GpConfig, GpThompson, ValueWeightedThompson};

#[test]
fn bernoulli_posterior_matches_hand_computed_sequence() {
    // Sequence (0,1), (0,1), (1,0), (0,1) over 3 arms.
    let mut learner = BernoulliThompson::with_seed(3, 1).unwrap();
    learner.update(0, 1.0).unwrap();
    learner.update(0, 1.0).unwrap();
    learner.update(1, 0.0).unwrap();
    learner.update(0, 1.0).unwrap();

    let expected_alpha = [4.0, 1.0, 1.0];
    let expected_beta = [1.0, 2.0, 1.0];
    for arm in 0..3 {
        let posterior = learner.posteriors().get(arm).unwrap();
        assert!(
            (posterior.alpha - expected_alpha[arm]).abs() < 1e-12,
            "arm {arm}: alpha {} != {}",
            posterior.alpha,
            expected_alpha[arm]
        );
        assert!(
            (posterior.beta - expected_beta[arm]).abs() < 1e-12,
            "arm {arm}: beta {} != {}",
            posterior.beta,
            expected_beta[arm]
        );
    }
    let p = learner.success_probability(0).unwrap();
    assert!((p - 0.8).abs() < 1e-12, "expected 4/5, got {p}");
    assert_eq!(learner.history().len(), 4);
}

#[test]
fn bernoulli_identical_posteriors_select_near_uniformly() {
    // All arms at the uniform prior: selection frequencies over many
    // trials should converge to 1/k each.
    let n_arms = 4;
    let trials = 20_000;
    let mut learner = BernoulliThompson::with_seed(n_arms, 123).unwrap();

    let mut counts = vec![0usize; n_arms];
    for _ in 0..trials {
        counts[learner.select()] += 1;
    }

    let expected = trials as f64 / n_arms as f64;
    // Chi-square statistic against uniform; 3 dof, far beyond the 0.999
    // quantile (≈ 16.3) so only gross non-uniformity trips it.
    let chi_square: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();
    assert!(
        chi_square < 25.0,
        "selection frequencies too far from uniform: {counts:?} (chi² = {chi_square:.2})"
    );
}

#[test]
fn value_weighted_full_pricing_round() {
    // Three candidate prices; the middle one converts often enough to win
    // on expected value.
    let prices = [10.0, 20.0, 40.0];
    let mut learner = ValueWeightedThompson::with_seed(3, 77).unwrap();

    // Conversion profile: arm 0 always sells, arm 1 sells 3 in 4,
    // arm 2 sells 1 in 10 — expected values 10, 15, 4.
    for round in 0..400 {
        for (arm, &price) in prices.iter().enumerate() {
            let sold = match arm {
                0 => true,
                1 => round % 4 != 0,
                _ => round % 10 == 0,
            };
            let revenue = if sold { price } else { 0.0 };
            learner.update(arm, revenue).unwrap();
        }
    }

    assert_eq!(learner.best_arm(&prices).unwrap(), 1);

    let ev = learner.expected_value(1, prices[1]).unwrap();
    assert!((ev - 15.0).abs() < 1.0, "expected value near 15, got {ev}");

    let bound = learner.best_arm_lower_bound(&prices).unwrap();
    assert!(bound <= ev, "lower bound {bound} must not exceed ev {ev}");
    assert!(bound > 0.0, "after 400 rounds the bound should be informative");

    // The stochastic path should also favor the best arm by now.
    let picks_of_1 = (0..200)
        .filter(|_| learner.select(&prices).unwrap() == 1)
        .count();
    assert!(
        picks_of_1 > 120,
        "thompson selection should favor arm 1: {picks_of_1}/200"
    );
}

#[test]
fn value_weighted_zero_values_tie_break_to_arm_zero() {
    let mut learner = ValueWeightedThompson::with_seed(5, 3).unwrap();
    for _ in 0..100 {
        assert_eq!(learner.select(&[0.0; 5]).unwrap(), 0);
    }
}

#[test]
fn gp_single_observation_scenario() {
    // Arms at price points [1, 5, 10]; one clean observation at arm 1.
    let mut learner = GpThompson::with_seed(vec![1.0, 5.0, 10.0], GpConfig::default(), 9).unwrap();
    learner.update(1, 5.0).unwrap();

    let (mean, _) = learner.posterior(1).unwrap();
    assert!(
        (mean - 5.0).abs() < 0.5,
        "predicted mean at the observed price should be within ±0.5 of 5: {mean}"
    );

    // Arms far from the observation keep near-prior uncertainty.
    let (_, std_far) = learner.posterior(2).unwrap();
    assert!(std_far > 9.0, "distant arm std should stay near 10: {std_far}");
}

#[test]
fn gp_learner_finds_the_revenue_peak() {
    // Smooth revenue curve peaking at price 6: r(p) = 30 − (p − 6)².
    let prices = vec![2.0, 4.0, 6.0, 8.0, 10.0];
    let revenue = |p: f64| 30.0 - (p - 6.0) * (p - 6.0);
    let mut learner = GpThompson::with_seed(prices.clone(), GpConfig::default(), 21).unwrap();

    for _ in 0..40 {
        let arm = learner.select();
        learner.update(arm, revenue(prices[arm])).unwrap();
    }

    // After 40 rounds the learner should pull the peak arm most often.
    let picks: Vec<usize> = (0..100).map(|_| learner.select()).collect();
    let peak_picks = picks.iter().filter(|&&a| a == 2).count();
    assert!(
        peak_picks > 50,
        "learner should concentrate on the revenue peak: {peak_picks}/100"
    );
}

#[test]
fn read_only_queries_are_idempotent_across_learners() {
    let mut bernoulli = BernoulliThompson::with_seed(2, 4).unwrap();
    bernoulli.update(0, 1.0).unwrap();
    let p = bernoulli.success_probability(0).unwrap();

    let mut gp = GpThompson::with_seed(vec![1.0, 2.0], GpConfig::default(), 4).unwrap();
    gp.update(0, 3.0).unwrap();
    let posterior = gp.posterior(0).unwrap();

    for _ in 0..25 {
        assert_eq!(bernoulli.success_probability(0).unwrap(), p);
        assert_eq!(gp.posterior(0).unwrap(), posterior);
    }
}

#[test]
fn summaries_serialize_for_external_reporting() {
    let mut learner = ValueWeightedThompson::with_seed(2, 6).unwrap();
    learner.update(0, 12.0).unwrap();
    let json = serde_json::to_string(&learner.summary()).unwrap();
    assert!(json.contains("\"total_reward\":12.0"));

    let gp = GpThompson::with_seed(vec![1.0], GpConfig::default(), 6).unwrap();
    let json = serde_json::to_string(&gp.summary()).unwrap();
    assert!(json.contains("\"n_observations\":0"));
}
