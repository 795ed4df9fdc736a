//! Self-contained HTML/CSS/SVG illustration fragments.
//!
//! Each fragment is a string of markup with its own inline styles and
//! keyframes, safe to parse in isolation and to splice into an article
//! body. Suggestion scans the prose for trigger vocabulary; rendering is
//! pure and deterministic so fragments can be asserted byte for byte.

use std::f64::consts::PI;

use serde::Serialize;

const BAR_CHART_TRIGGERS: [&str; 5] = ["statistique", "pourcentage", "%", "étude", "résultat"];
const INFOGRAPHIC_TRIGGERS: [&str; 4] = ["processus", "étape", "méthode", "comment"];
const PROGRESS_TRIGGERS: [&str; 4] = ["performance", "amélioration", "progression", "succès"];
const DIAGRAM_TRIGGERS: [&str; 3] = ["organisation", "flux", "workflow"];

/// Team-impact percentages shown by the default bar chart.
const TEAM_IMPACT_DATA: [(&str, u32); 5] = [
    ("Cohésion équipe", 85),
    ("Productivité", 78),
    ("Communication", 92),
    ("Motivation", 88),
    ("Innovation", 76),
];

const BAR_COLORS: [&str; 5] = ["#7E22CE", "#A94BE0", "#6B1B9A", "#8B5A9F", "#9F4BBD"];

const PROCESS_STEPS: [(&str, &str, &str); 4] = [
    ("🔍", "Diagnostic", "Analyse des besoins équipe"),
    ("📋", "Planification", "Choix du lieu et activités"),
    ("🏔️", "Animation", "Séminaire dans les Vosges"),
    ("📈", "Suivi", "Mesure des impacts"),
];

const FLOW_STEPS: [&str; 4] = ["Contact", "Analyse", "Séminaire", "Suivi"];

const KEY_ICONS: [&str; 6] = ["🏔️", "👥", "🚀", "📈", "💼", "🎯"];

/// The illustration families an article can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IllustrationKind {
    BarChart,
    Infographic,
    ProgressRing,
    ProcessDiagram,
    IconGrid,
}

/// Suggest illustrations for an article from its prose and headline.
///
/// Trigger groups are evaluated in a fixed order and each contributes at
/// most one suggestion. Content with no trigger at all falls back to the
/// thematic icon grid.
#[must_use]
pub fn suggest(content: &str, title: &str) -> Vec<IllustrationKind> {
    let text = format!("{content} {title}").to_lowercase();
    let triggered = |words: &[&str]| words.iter().any(|w| text.contains(w));

    let mut kinds = Vec::new();
    if triggered(&BAR_CHART_TRIGGERS) {
        kinds.push(IllustrationKind::BarChart);
    }
    if triggered(&INFOGRAPHIC_TRIGGERS) {
        kinds.push(IllustrationKind::Infographic);
    }
    if triggered(&PROGRESS_TRIGGERS) {
        kinds.push(IllustrationKind::ProgressRing);
    }
    if triggered(&DIAGRAM_TRIGGERS) {
        kinds.push(IllustrationKind::ProcessDiagram);
    }
    if kinds.is_empty() {
        kinds.push(IllustrationKind::IconGrid);
    }
    kinds
}

/// Render one illustration kind to its markup fragment.
#[must_use]
pub fn render(kind: IllustrationKind) -> String {
    match kind {
        IllustrationKind::BarChart => bar_chart(),
        IllustrationKind::Infographic => infographic(),
        IllustrationKind::ProgressRing => progress_ring(85, "Satisfaction globale"),
        IllustrationKind::ProcessDiagram => process_diagram(),
        IllustrationKind::IconGrid => icon_grid("Éléments clés d'un séminaire réussi", &KEY_ICONS),
    }
}

/// Animated bar chart of the default team-impact data set.
fn bar_chart() -> String {
    let max_value = TEAM_IMPACT_DATA.iter().map(|(_, v)| *v).max().unwrap_or(100);

    let mut bars = String::new();
    for (i, (label, value)) in TEAM_IMPACT_DATA.iter().enumerate() {
        let height = f64::from(*value) / f64::from(max_value) * 100.0;
        let color = BAR_COLORS[i % BAR_COLORS.len()];
        let delay = i as f64 * 0.2;
        bars.push_str(&format!(
            r##"
        <div class="chart-bar" style="width: 18%; height: {height:.1}%; background: linear-gradient(to top, {color}, {color}AA); border-radius: 4px 4px 0 0; position: relative; margin: 0 1%; animation: seminary-bar-grow 1.5s ease-out {delay:.1}s both;">
            <span style="position: absolute; top: -1.8rem; left: 50%; transform: translateX(-50%); font-weight: 600; font-size: 0.9rem; color: #333;">{value}%</span>
            <span style="position: absolute; bottom: -2.5rem; left: 50%; transform: translateX(-50%); font-size: 0.8rem; color: #666; text-align: center; width: 120%;">{label}</span>
        </div>"##
        ));
    }

    format!(
        r##"
<div class="seminary-chart-container" style="margin: 2rem 0; padding: 2rem; background: linear-gradient(135deg, #f8f9ff 0%, #e8edff 100%); border-radius: 12px; box-shadow: 0 4px 6px rgba(0,0,0,0.1);">
    <h3 style="text-align: center; color: #7E22CE; margin-bottom: 2rem; font-weight: 600;">Impact des séminaires Seminary sur les équipes</h3>
    <div class="chart-bars" style="display: flex; align-items: end; justify-content: space-between; height: 200px; margin-bottom: 3rem;">{bars}
    </div>
    <p style="text-align: center; color: #666; font-size: 0.9rem;">Amélioration moyenne constatée 3 mois après un séminaire Seminary dans les Vosges</p>
</div>
<style>
@keyframes seminary-bar-grow {{
    from {{ height: 0%; }}
}}
.seminary-chart-container:hover .chart-bar {{ transform: scale(1.05); transition: transform 0.3s ease; }}
</style>
"##
    )
}

/// Circular progress gauge with a gradient stroke.
fn progress_ring(value: u32, label: &str) -> String {
    let circumference = 2.0 * PI * 45.0;
    let offset = circumference * (1.0 - f64::from(value) / 100.0);

    format!(
        r##"
<div class="seminary-progress-chart" style="display: flex; align-items: center; justify-content: center; padding: 2rem; margin: 2rem 0; background: linear-gradient(135deg, #7E22CE10, #A94BE020); border-radius: 16px; box-shadow: 0 4px 12px rgba(126, 34, 206, 0.1);">
    <div style="position: relative; width: 200px; height: 200px;">
        <svg width="200" height="200" style="transform: rotate(-90deg);">
            <circle cx="100" cy="100" r="45" fill="none" stroke="#e5e7eb" stroke-width="8"/>
            <circle cx="100" cy="100" r="45" fill="none" stroke="url(#seminary-gradient)" stroke-width="8" stroke-linecap="round" stroke-dasharray="{circumference:.2}" stroke-dashoffset="{offset:.2}" style="animation: seminary-progress-draw 2s ease-out forwards;"/>
            <defs>
                <linearGradient id="seminary-gradient" x1="0%" y1="0%" x2="100%" y2="0%">
                    <stop offset="0%" stop-color="#7E22CE"/>
                    <stop offset="100%" stop-color="#A94BE0"/>
                </linearGradient>
            </defs>
        </svg>
        <div style="position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); text-align: center;">
            <div style="font-size: 2.5rem; font-weight: 700; color: #7E22CE; line-height: 1;">{value}%</div>
            <div style="font-size: 0.9rem; color: #666; margin-top: 0.5rem; font-weight: 500;">{label}</div>
        </div>
    </div>
</div>
<style>
@keyframes seminary-progress-draw {{
    from {{ stroke-dashoffset: {circumference:.2}; }}
    to {{ stroke-dashoffset: {offset:.2}; }}
}}
</style>
"##
    )
}

/// Four-step process infographic with icon medallions.
fn infographic() -> String {
    let mut steps = String::new();
    for (i, (icon, title, desc)) in PROCESS_STEPS.iter().enumerate() {
        let delay = i as f64 * 0.3;
        let connector = if i < PROCESS_STEPS.len() - 1 { "block" } else { "none" };
        steps.push_str(&format!(
            r##"
        <div class="infographic-step" style="text-align: center; position: relative; animation: seminary-step-appear 0.6s ease-out {delay:.1}s both;">
            <div style="width: 80px; height: 80px; background: linear-gradient(135deg, #7E22CE, #A94BE0); border-radius: 50%; display: flex; align-items: center; justify-content: center; margin: 0 auto 1rem; font-size: 2rem; color: white; box-shadow: 0 4px 15px rgba(126, 34, 206, 0.3);">{icon}</div>
            <h4 style="color: #333; margin-bottom: 0.5rem; font-weight: 600;">{title}</h4>
            <p style="color: #666; font-size: 0.9rem; line-height: 1.5;">{desc}</p>
            <div style="position: absolute; top: 40px; right: -1rem; width: 2rem; height: 2px; background: linear-gradient(to right, #7E22CE, transparent); display: {connector};"></div>
        </div>"##
        ));
    }

    format!(
        r##"
<div class="seminary-infographic" style="margin: 2rem 0; padding: 2rem; background: white; border-radius: 16px; box-shadow: 0 8px 25px rgba(126, 34, 206, 0.1);">
    <h3 style="text-align: center; color: #7E22CE; margin-bottom: 3rem; font-weight: 600; font-size: 1.8rem;">Processus Seminary en 4 étapes</h3>
    <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 2rem; position: relative;">{steps}
    </div>
</div>
<style>
@keyframes seminary-step-appear {{
    from {{ opacity: 0; transform: translateY(30px); }}
    to {{ opacity: 1; transform: translateY(0); }}
}}
.infographic-step:hover {{ transform: translateY(-5px); transition: transform 0.3s ease; }}
</style>
"##
    )
}

/// Horizontal organization flow with pill-shaped stages.
fn process_diagram() -> String {
    let mut stages = String::new();
    for (i, stage) in FLOW_STEPS.iter().enumerate() {
        let delay = i as f64 * 0.3;
        // alternate the gradient direction between stages
        let gradient = if i % 2 == 0 {
            "linear-gradient(135deg, #7E22CE, #A94BE0)"
        } else {
            "linear-gradient(135deg, #A94BE0, #7E22CE)"
        };
        if i > 0 {
            stages.push_str(
                r##"
        <div style="width: 50px; height: 2px; background: linear-gradient(to right, #7E22CE, #A94BE0);"></div>"##,
            );
        }
        stages.push_str(&format!(
            r##"
        <div class="process-step" style="background: {gradient}; color: white; padding: 1rem 1.5rem; border-radius: 25px; font-weight: 600; box-shadow: 0 4px 15px rgba(126, 34, 206, 0.3); animation: seminary-process-appear 0.6s ease-out {delay:.1}s both;">{stage}</div>"##
        ));
    }

    format!(
        r##"
<div class="seminary-process-diagram" style="margin: 2rem 0; padding: 2rem; background: white; border-radius: 16px; box-shadow: 0 4px 12px rgba(126, 34, 206, 0.1); overflow-x: auto;">
    <h3 style="text-align: center; color: #7E22CE; margin-bottom: 2rem;">Flux d'organisation Seminary</h3>
    <div style="display: flex; align-items: center; justify-content: space-between; min-width: 600px; position: relative;">{stages}
    </div>
</div>
<style>
@keyframes seminary-process-appear {{
    from {{ opacity: 0; transform: translateY(10px); }}
    to {{ opacity: 1; transform: translateY(0); }}
}}
.process-step:hover {{ transform: translateY(-3px); transition: transform 0.3s ease; }}
</style>
"##
    )
}

/// Bouncing icon grid under a thematic heading.
fn icon_grid(title: &str, icons: &[&str]) -> String {
    let mut cells = String::new();
    for (i, icon) in icons.iter().enumerate() {
        let delay = i as f64 * 0.1;
        cells.push_str(&format!(
            r##"
        <div style="font-size: 3rem; animation: seminary-icon-bounce 1s ease-out {delay:.1}s both;">{icon}</div>"##
        ));
    }

    format!(
        r##"
<div class="seminary-icon-grid" style="margin: 2rem 0; padding: 2rem; background: linear-gradient(135deg, #f8f9ff 0%, #e8edff 100%); border-radius: 16px; text-align: center;">
    <h3 style="color: #7E22CE; margin-bottom: 2rem; font-weight: 600;">{title}</h3>
    <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(100px, 1fr)); gap: 1.5rem; justify-items: center;">{cells}
    </div>
</div>
<style>
@keyframes seminary-icon-bounce {{
    0% {{ transform: translateY(30px); opacity: 0; }}
    50% {{ transform: translateY(-10px); opacity: 0.7; }}
    100% {{ transform: translateY(0); opacity: 1; }}
}}
</style>
"##
    )
}
