use yew::prelude::*;
use shared::ChartModel;
use super::chart_canvas::ChartCanvas;

#[derive(Properties, PartialEq)]
pub struct BalanceSparklineProps {
    pub model: ChartModel,
}

/// Latest balance headline over the recent daily usage sparkline
#[function_component(BalanceSparkline)]
pub fn balance_sparkline(props: &BalanceSparklineProps) -> Html {
    let model = &props.model;
    html! {
        <div class="chart-container balance-card">
            <div class="balance-headline">
                if let Some(title) = model.title.clone() {
                    <h2 class="balance-title">{ title }</h2>
                }
                if let Some(subtitle) = model.subtitle.clone() {
                    <p class="balance-subtitle">{ subtitle }</p>
                }
            </div>
            <ChartCanvas model={model.clone()} />
        </div>
    }
}
