use yew::prelude::*;
use shared::ChartModel;
use super::chart_canvas::ChartCanvas;

#[derive(Properties, PartialEq)]
pub struct MonthlyUsageChartProps {
    pub model: ChartModel,
}

#[function_component(MonthlyUsageChart)]
pub fn monthly_usage_chart(props: &MonthlyUsageChartProps) -> Html {
    let model = &props.model;
    html! {
        <div class="chart-container">
            <div class="chart-header">
                <h3>{ model.title.clone().unwrap_or_else(|| "Monthly usage".to_string()) }</h3>
                if let Some(subtitle) = model.subtitle.clone() {
                    <span class="chart-subtitle">{ subtitle }</span>
                }
            </div>
            <ChartCanvas model={model.clone()} />
        </div>
    }
}
