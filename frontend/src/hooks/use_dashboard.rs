use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use shared::{
    ChartModel, DashboardCharts, DashboardConfig, DashboardController, FilterSelection, LoadError,
    LoadOutcome, Resident,
};
use crate::hooks::use_chart_store::{use_chart_store, StoreSink};
use crate::services::date_utils::today_local;
use crate::services::{api_client, GlooHttp, Logger};

const COMPONENT: &str = "dashboard";

#[derive(Clone, PartialEq)]
pub struct DashboardState {
    pub residents: Vec<Resident>,
    /// Raw selector value; empty when there is nothing to select
    pub selected_resident: String,
    pub start_date: String,
    pub end_date: String,
    pub loading: bool,
    pub error: Option<String>,
    pub balance_chart: ChartModel,
    pub monthly_chart: ChartModel,
}

#[derive(Clone)]
pub struct UseDashboardActions {
    pub on_resident_change: Callback<String>,
    pub on_range_change: Callback<(String, String)>,
    pub query: Callback<()>,
    pub dismiss_error: Callback<()>,
}

pub struct UseDashboardResult {
    pub state: DashboardState,
    pub actions: UseDashboardActions,
}

#[hook]
pub fn use_dashboard(config: &DashboardConfig) -> UseDashboardResult {
    let controller: Rc<DashboardController<GlooHttp>> = use_memo((), {
        let config = config.clone();
        move |_| DashboardController::new(api_client(&config), config)
    });

    let balance_chart = use_chart_store(ChartModel::balance_sparkline);
    let monthly_chart = use_chart_store(ChartModel::monthly_usage);

    let initial_range = use_memo((), {
        let controller = controller.clone();
        move |_| controller.default_range(today_local())
    });

    let residents = use_state(Vec::<Resident>::new);
    let selected_resident = use_state(String::new);
    let start_date = use_state(|| initial_range.start_str());
    let end_date = use_state(|| initial_range.end_str());
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    // Set once the resident list is in; the first load waits for it
    let filters_ready = use_state(|| false);

    // Load charts for the current filter values
    let query = {
        let controller = controller.clone();
        let balance_dispatcher = balance_chart.dispatcher();
        let monthly_dispatcher = monthly_chart.dispatcher();
        let loading = loading.clone();
        let error = error.clone();

        use_callback(
            (
                (*selected_resident).clone(),
                (*start_date).clone(),
                (*end_date).clone(),
            ),
            move |_: (), (resident, start, end)| {
                let filter = FilterSelection::from_inputs(resident, start, end);
                let controller = controller.clone();
                let mut charts = DashboardCharts::new(
                    StoreSink::new(balance_dispatcher.clone()),
                    StoreSink::new(monthly_dispatcher.clone()),
                );
                let loading = loading.clone();
                let error = error.clone();

                spawn_local(async move {
                    loading.set(true);

                    let result = controller.load(&filter, today_local(), &mut charts).await;
                    match result {
                        Ok(LoadOutcome::Completed) => {
                            error.set(None);
                            loading.set(false);
                        }
                        // The running load still owns the spinner
                        Ok(LoadOutcome::Busy) => {
                            Logger::info_with_component(COMPONENT, "load already in progress");
                        }
                        Err(LoadError::Validation(e)) => {
                            loading.set(false);
                            gloo::dialogs::alert(e.notice());
                        }
                        Err(LoadError::Request(e)) => {
                            loading.set(false);
                            gloo::console::error!("Failed to load dashboard:", e.to_string());
                            error.set(Some(format!("Failed to load dashboard: {}", e)));
                        }
                    }
                });
            },
        )
    };

    // Populate the resident selector on mount
    use_effect_with((), {
        let controller = controller.clone();
        let residents = residents.clone();
        let selected_resident = selected_resident.clone();
        let error = error.clone();
        let filters_ready = filters_ready.clone();

        move |_| {
            spawn_local(async move {
                match controller.load_residents().await {
                    Ok((list, selected)) => {
                        residents.set(list);
                        let selected = selected.map(|id| id.to_string()).unwrap_or_default();
                        selected_resident.set(selected);
                        filters_ready.set(true);
                    }
                    Err(e) => {
                        let message = format!("Failed to load residents: {}", e);
                        Logger::error_with_component(COMPONENT, &message);
                        error.set(Some(message));
                    }
                }
            });

            || ()
        }
    });

    // Initial load once the filters have their first values
    use_effect_with(*filters_ready, {
        let query = query.clone();
        move |ready| {
            if *ready {
                query.emit(());
            }
            || ()
        }
    });

    let on_resident_change = {
        let selected_resident = selected_resident.clone();
        Callback::from(move |value: String| selected_resident.set(value))
    };

    let on_range_change = {
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        Callback::from(move |(start, end): (String, String)| {
            start_date.set(start);
            end_date.set(end);
        })
    };

    let dismiss_error = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    let state = DashboardState {
        residents: (*residents).clone(),
        selected_resident: (*selected_resident).clone(),
        start_date: (*start_date).clone(),
        end_date: (*end_date).clone(),
        loading: *loading,
        error: (*error).clone(),
        balance_chart: balance_chart.model.clone(),
        monthly_chart: monthly_chart.model.clone(),
    };

    let actions = UseDashboardActions {
        on_resident_change,
        on_range_change,
        query,
        dismiss_error,
    };

    UseDashboardResult { state, actions }
}
