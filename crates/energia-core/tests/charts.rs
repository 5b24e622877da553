use anyhow::Result;

use energia_core::charts::ChartData;
use energia_core::pipelines::score_states;
use energia_core::ranking::{sort_by_score, TOP_N};
use energia_core::types::scored_records;

#[test]
fn chart_data_mirrors_ranked_table() -> Result<()> {
    let scored = score_states()?;
    let ranked = scored_records(&sort_by_score(&scored)?)?;
    let data = ChartData::from_frame(&scored)?;

    assert_eq!(data.top_scores.len(), TOP_N);
    for ((code, score), record) in data.top_scores.iter().zip(&ranked) {
        assert_eq!(code, &record.code);
        assert_eq!(*score, record.potential_score);
    }

    assert_eq!(data.deficit_vs_installation.len(), ranked.len());
    assert_eq!(data.gdp_per_capita_vs_score.len(), ranked.len());
    assert_eq!(data.population_vs_capacity.len(), ranked.len());

    for point in &data.deficit_vs_installation {
        assert!((point.y - point.score * 100.0).abs() < 1e-9);
        assert!(point.x < 0.0);
    }

    let sp = ranked.iter().position(|r| r.code == "SP").unwrap();
    assert_eq!(data.population_vs_capacity[sp], (45.9, 28000.0));

    Ok(())
}

#[test]
fn fewer_states_than_top_n_are_all_charted() {
    let ranked = scored_records(&sort_by_score(&score_states().unwrap()).unwrap()).unwrap();
    let data = ChartData::from_records(&ranked[..3]);

    assert_eq!(data.top_scores.len(), 3);
    assert_eq!(data.deficit_vs_installation.len(), 3);
}
