use yew::prelude::*;
use shared::DashboardConfig;

mod components;
mod hooks;
mod services;

use components::{BalanceSparkline, FilterBar, MonthlyUsageChart, NoticeBanner};
use hooks::use_dashboard;

/// API base baked in at build time; same-origin when unset
fn dashboard_config() -> DashboardConfig {
    DashboardConfig::with_api_base(option_env!("USAGE_DASHBOARD_API_BASE"))
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| dashboard_config());
    let dashboard = use_dashboard(&config);
    let state = &dashboard.state;
    let actions = &dashboard.actions;

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"Electricity Usage Dashboard"}</h1>
                </div>
            </header>
            <main class="main">
                <div class="container">
                    <NoticeBanner
                        message={state.error.clone()}
                        on_dismiss={actions.dismiss_error.clone()}
                    />
                    <FilterBar
                        residents={state.residents.clone()}
                        selected_resident={state.selected_resident.clone()}
                        start_date={state.start_date.clone()}
                        end_date={state.end_date.clone()}
                        loading={state.loading}
                        on_resident_change={actions.on_resident_change.clone()}
                        on_range_change={actions.on_range_change.clone()}
                        on_query={actions.query.clone()}
                    />
                    <section class="charts-section">
                        <BalanceSparkline model={state.balance_chart.clone()} />
                        <MonthlyUsageChart model={state.monthly_chart.clone()} />
                    </section>
                </div>
            </main>
        </>
    }
}

fn main() {
    services::logging::init();
    yew::Renderer::<App>::new().render();
}
