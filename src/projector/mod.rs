//! Project an aggregate onto treemap chart input.
//!
//! The projector turns an [`Aggregate`] into the flat, positionally
//! aligned arrays a hierarchical-chart trace consumes: one synthetic root
//! at index 0, then the children exactly in engine order. Its contract
//! ends at [`TreemapInput::to_figure`], a Plotly-style figure document
//! handed to an external renderer treated as a black box.

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::{Aggregate, ColorScheme};

/// Label and id of the synthetic root node.
pub const ROOT_LABEL: &str = "All Jobs";

/// Parent sentinel of the root node.
pub const NO_PARENT: &str = "";

/// User-visible empty state for a query that matched nothing.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected criteria.";

/// Flat chart input: all arrays have length 1 (root) + N children and are
/// positionally aligned. Reordering after projection would break the
/// percent-of-root semantics consumers derive from positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapInput {
    /// Node ids: root label, then occupation codes.
    pub ids: Vec<String>,
    /// Node labels: root label, then occupation titles.
    pub labels: Vec<String>,
    /// Parent ids: empty for the root, root label for every child.
    pub parents: Vec<String>,
    /// Sized values: root sum, then per-record parameter values.
    pub values: Vec<f64>,
    /// Color metric values: neutral 0 for the root, then per-record
    /// values under the query's color scheme.
    pub color_values: Vec<f64>,
    /// Display labels with the color metric annotated per child.
    pub text: Vec<String>,
    /// Plotly color scale name for the scheme.
    pub color_scale: String,
    /// Color bar title for the scheme.
    pub color_bar_title: String,
    /// Chart title.
    pub title: String,
}

/// Project an aggregate into chart input arrays.
///
/// Deterministic and side-effect free: projecting the same aggregate
/// twice yields identical arrays.
pub fn project(aggregate: &Aggregate) -> TreemapInput {
    let query = &aggregate.query;
    let scheme = query.color_scheme;
    let n = aggregate.children.len();

    let mut ids = Vec::with_capacity(n + 1);
    let mut labels = Vec::with_capacity(n + 1);
    let mut parents = Vec::with_capacity(n + 1);
    let mut values = Vec::with_capacity(n + 1);
    let mut color_values = Vec::with_capacity(n + 1);
    let mut text = Vec::with_capacity(n + 1);

    ids.push(ROOT_LABEL.to_string());
    labels.push(ROOT_LABEL.to_string());
    parents.push(NO_PARENT.to_string());
    values.push(aggregate.root_value);
    color_values.push(0.0);
    text.push(ROOT_LABEL.to_string());

    for record in &aggregate.children {
        let color_value = scheme.value_of(record);
        ids.push(record.code.clone());
        labels.push(record.title.clone());
        parents.push(ROOT_LABEL.to_string());
        values.push(query.parameter.value_of(record));
        color_values.push(color_value);
        text.push(format!(
            "{}<br>{}",
            record.title,
            annotate(scheme, color_value)
        ));
    }

    let year_label = query
        .year
        .map_or_else(|| "All years".to_string(), |y| y.to_string());
    let region_label = query
        .region
        .clone()
        .unwrap_or_else(|| "All regions".to_string());

    TreemapInput {
        ids,
        labels,
        parents,
        values,
        color_values,
        text,
        color_scale: color_scale(scheme).to_string(),
        color_bar_title: color_bar_title(scheme).to_string(),
        title: format!(
            "{} Treemap - {} - {}",
            query.parameter.display_name(),
            year_label,
            region_label
        ),
    }
}

/// Plotly color scale for a scheme.
pub fn color_scale(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Complexity => "Viridis",
        ColorScheme::Employment => "Blues",
        ColorScheme::Wage => "Oranges",
    }
}

/// Color bar title for a scheme.
pub fn color_bar_title(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Complexity => "Complexity Score",
        ColorScheme::Employment => "Employment",
        ColorScheme::Wage => "Average Wage ($)",
    }
}

/// Human-readable color metric annotation for a child label.
fn annotate(scheme: ColorScheme, value: f64) -> String {
    match scheme {
        ColorScheme::Complexity => format!("{}: {:.2}", scheme.display_name(), value),
        ColorScheme::Employment => format!("{}: {:.0}", scheme.display_name(), value),
        ColorScheme::Wage => format!("{}: ${:.0}", scheme.display_name(), value),
    }
}

impl TreemapInput {
    /// Serialize the full figure document: one treemap trace plus layout
    /// and config, ready for a Plotly-compatible renderer.
    pub fn to_figure(&self) -> Value {
        json!({
            "data": [{
                "type": "treemap",
                "ids": self.ids,
                "labels": self.labels,
                "parents": self.parents,
                "values": self.values,
                "text": self.text,
                "textinfo": "label+value+percent root",
                "hovertemplate": "<b>%{label}</b><br>Value: %{value}<br>Percentage: %{percentRoot}<br><extra></extra>",
                "marker": {
                    "colors": self.color_values,
                    "colorscale": self.color_scale,
                    "colorbar": {
                        "title": self.color_bar_title,
                        "x": 1.02
                    },
                    "line": {
                        "width": 2,
                        "color": "white"
                    }
                },
                "pathbar": {
                    "visible": true,
                    "side": "top",
                    "edgeshape": "round",
                    "thickness": 20
                }
            }],
            "layout": {
                "title": {
                    "text": self.title,
                    "font": { "size": 16 }
                },
                "font": { "size": 12 },
                "margin": { "t": 50, "l": 0, "r": 100, "b": 0 },
                "autosize": true,
                "height": 600
            },
            "config": {
                "responsive": true,
                "displayModeBar": true,
                "modeBarButtonsToRemove": ["pan2d", "lasso2d", "select2d"],
                "displaylogo": false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{select, Selection};
    use crate::models::{Limit, Parameter, Query, Record, RegionType};

    fn record(code: &str, title: &str, employment: f64, complexity: f64) -> Record {
        Record {
            year: 2024,
            region_type: RegionType::National,
            region: "United States".to_string(),
            code: code.to_string(),
            title: title.to_string(),
            employment,
            complexity_score: complexity,
            ..Record::default()
        }
    }

    fn sample_aggregate() -> Aggregate {
        let records = vec![
            record("11-0000", "Management Occupations", 30.0, 0.78),
            record("15-0000", "Computer and Mathematical Occupations", 20.0, 0.83),
        ];
        match select(&records, &Query::default()) {
            Selection::Matched(aggregate) => aggregate,
            Selection::Empty => panic!("sample records must match the default query"),
        }
    }

    #[test]
    fn test_arrays_positionally_aligned() {
        let input = project(&sample_aggregate());

        assert_eq!(input.ids.len(), 3);
        assert_eq!(input.labels.len(), 3);
        assert_eq!(input.parents.len(), 3);
        assert_eq!(input.values.len(), 3);
        assert_eq!(input.color_values.len(), 3);
        assert_eq!(input.text.len(), 3);
    }

    #[test]
    fn test_synthetic_root_at_index_zero() {
        let input = project(&sample_aggregate());

        assert_eq!(input.ids[0], ROOT_LABEL);
        assert_eq!(input.labels[0], ROOT_LABEL);
        assert_eq!(input.parents[0], NO_PARENT);
        assert_eq!(input.values[0], 50.0);
        assert_eq!(input.color_values[0], 0.0);
    }

    #[test]
    fn test_children_mirror_engine_order() {
        let input = project(&sample_aggregate());

        // Engine order: ranked by employment descending.
        assert_eq!(input.ids[1], "11-0000");
        assert_eq!(input.ids[2], "15-0000");
        assert_eq!(input.values[1], 30.0);
        assert_eq!(input.values[2], 20.0);
        assert_eq!(input.parents[1], ROOT_LABEL);
        assert_eq!(input.parents[2], ROOT_LABEL);
    }

    #[test]
    fn test_label_annotation_two_decimal_complexity() {
        let input = project(&sample_aggregate());

        assert_eq!(input.text[1], "Management Occupations<br>Complexity: 0.78");
        assert_eq!(input.labels[1], "Management Occupations");
    }

    #[test]
    fn test_wage_scheme_color_values_and_titles() {
        let mut aggregate = sample_aggregate();
        aggregate.query.color_scheme = ColorScheme::Wage;
        aggregate.children[0].mean_wage = 122_090.0;
        aggregate.children[1].mean_wage = 104_420.0;

        let input = project(&aggregate);
        assert_eq!(input.color_values[1], 122_090.0);
        assert_eq!(input.color_scale, "Oranges");
        assert_eq!(input.color_bar_title, "Average Wage ($)");
        assert_eq!(input.text[1], "Management Occupations<br>Wage: $122090");
    }

    #[test]
    fn test_projection_idempotent() {
        let aggregate = sample_aggregate();
        assert_eq!(project(&aggregate), project(&aggregate));
    }

    #[test]
    fn test_title_from_query() {
        let input = project(&sample_aggregate());
        assert_eq!(input.title, "Employment Treemap - 2024 - United States");

        let mut aggregate = sample_aggregate();
        aggregate.query.year = None;
        aggregate.query.region = None;
        aggregate.query.parameter = Parameter::Gdp;
        let input = project(&aggregate);
        assert_eq!(input.title, "GDP Treemap - All years - All regions");
    }

    #[test]
    fn test_scheme_lookup_tables() {
        assert_eq!(color_scale(ColorScheme::Complexity), "Viridis");
        assert_eq!(color_scale(ColorScheme::Employment), "Blues");
        assert_eq!(color_bar_title(ColorScheme::Employment), "Employment");
        // Unmapped labels already fell back to the default scheme at parse
        // time, which lands on the default scale.
        assert_eq!(color_scale(ColorScheme::from_label("nonsense")), "Viridis");
    }

    #[test]
    fn test_figure_document_shape() {
        let input = project(&sample_aggregate());
        let figure = input.to_figure();

        assert_eq!(figure["data"][0]["type"], "treemap");
        assert_eq!(figure["data"][0]["ids"][0], ROOT_LABEL);
        assert_eq!(figure["data"][0]["marker"]["colorscale"], "Viridis");
        assert_eq!(figure["layout"]["title"]["text"], input.title);
        assert_eq!(figure["config"]["displaylogo"], false);
        // Deterministic render call.
        assert_eq!(figure, input.to_figure());
    }

    #[test]
    fn test_full_limit_preserves_unsorted_order() {
        let records = vec![
            record("a", "First", 10.0, 0.1),
            record("b", "Second", 30.0, 0.2),
        ];
        let query = Query {
            limit: Limit::All,
            ..Query::default()
        };
        let Selection::Matched(aggregate) = select(&records, &query) else {
            panic!("records match");
        };

        let input = project(&aggregate);
        assert_eq!(input.ids[1], "a");
        assert_eq!(input.ids[2], "b");
    }
}
