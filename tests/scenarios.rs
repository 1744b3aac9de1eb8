use rock::cluster::{Clustering, Rock};
use rock::io::{load_profile, write_report};
use rock::{AttributeProfile, ClusterReport, Error, ErrorKind, Metric, RockConfig};
use std::fs;

fn labelled(rows: &[Vec<u8>], names: &[&str]) -> AttributeProfile {
    AttributeProfile::from_binary(rows)
        .unwrap()
        .with_row_labels(names.iter().map(|s| s.to_string()).collect())
        .unwrap()
}

#[test]
fn scenario_a_two_exact_groups() {
    let p = labelled(
        &[vec![1, 1, 0], vec![1, 1, 0], vec![0, 0, 1], vec![0, 0, 1]],
        &["A", "B", "C", "D"],
    );
    let fit = Rock::new(2).with_threshold(0.5).fit_profile(&p).unwrap();
    assert_eq!(fit.composite_labels(p.row_labels()), vec!["A,B", "C,D"]);
}

#[test]
fn scenario_b_k_equals_n_keeps_singletons() {
    let rows = vec![vec![1, 0, 1], vec![0, 1, 1], vec![1, 1, 1]];
    let p = AttributeProfile::from_binary(&rows).unwrap();
    let fit = Rock::new(3).fit_profile(&p).unwrap();
    assert_eq!(fit.dendrogram().n_merges(), 0);

    let report = ClusterReport::build(&fit, &p).unwrap();
    assert_eq!(report.clusters.len(), 3);
    for (cluster, row) in report.clusters.iter().zip(&rows) {
        assert_eq!(cluster.members.len(), 1);
        let own: Vec<u64> = row.iter().map(|&v| u64::from(v)).collect();
        assert_eq!(cluster.frequencies, own);
    }
}

#[test]
fn scenario_c_identical_records_partition_cleanly() {
    let rows = vec![vec![1, 0, 1, 1]; 7];
    for k in 1..=7 {
        let fit = Rock::new(k).fit_predict(&rows).unwrap();
        assert_eq!(fit.iter().max(), Some(&(k - 1)));

        let profile = AttributeProfile::from_binary(&rows).unwrap();
        let fit = Rock::new(k).fit_profile(&profile).unwrap();
        assert_eq!(fit.n_clusters(), k);

        let mut seen: Vec<usize> = fit.clusters().concat();
        seen.sort_unstable();
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
    }
}

#[test]
fn smc_metric_clusters_on_shared_absence() {
    // Under Jaccard rows 0 and 1 share nothing; under SMC they agree on 3 of 4.
    let data = vec![vec![1, 0, 0, 0], vec![0, 0, 0, 0], vec![1, 1, 1, 1], vec![1, 1, 1, 0]];
    let labels = Rock::new(2)
        .with_metric(Metric::SimpleMatching)
        .with_threshold(0.75)
        .fit_predict(&data)
        .unwrap();
    assert_eq!(labels, vec![0, 0, 1, 1]);
}

#[test]
fn non_binary_values_are_data_format_errors() {
    let p = AttributeProfile::new(vec![
        vec!["1".to_string(), "yes".to_string()],
        vec!["0".to_string(), "1".to_string()],
    ])
    .unwrap();
    let err = Rock::new(1).fit_profile(&p).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataFormat);
    assert!(matches!(err, Error::NonBinaryValue { row: 0, col: 1, .. }));
}

#[test]
fn end_to_end_files() {
    let dir = tempfile::tempdir().unwrap();
    let matrix = dir.path().join("profile.tsv");
    let rows = dir.path().join("rows.txt");
    let cols = dir.path().join("cols.txt");
    fs::write(&matrix, "1\t1\t0\n1\t1\t0\n0\t0\t1\n0\t0\t1\n").unwrap();
    fs::write(&rows, "A\nB\nC\nD\n").unwrap();
    fs::write(&cols, "x\ny\nz\n").unwrap();

    let config = RockConfig::default().with_data_name("demo");
    let profile = load_profile(&matrix, Some(&rows), Some(&cols), '\t').unwrap();
    let fit = Rock::from_config(&config).fit_profile(&profile).unwrap();
    let report = ClusterReport::build(&fit, &profile).unwrap();
    let out = write_report(dir.path(), &config, &report).unwrap();

    let params = fs::read_to_string(out.join("parameters_demo.txt")).unwrap();
    assert_eq!(
        params,
        "clusters: 2\nsimilarity_Metric: JC\nmin_threshold_for_similarity:0.5"
    );
    let text = fs::read_to_string(out.join("final_output_demo.txt")).unwrap();
    assert!(text.starts_with("clusterID_0\npatID\tx\ty\tz\nA\t1\t1\t0\nB\t1\t1\t0\n"));
    assert!(text.contains("total_atts_in_cluster_1\t0\t0\t2\n"));

    // Same input, same bytes.
    let again = ClusterReport::build(
        &Rock::from_config(&config).fit_profile(&profile).unwrap(),
        &profile,
    )
    .unwrap();
    assert_eq!(again.to_string(), text);
}
