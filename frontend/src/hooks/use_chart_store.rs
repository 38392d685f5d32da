use std::rc::Rc;
use yew::prelude::*;
use shared::{ChartModel, ChartOptionsPatch, ChartSeries, ChartSink};

/// Page-lifetime state of one chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStore {
    pub model: ChartModel,
}

pub enum ChartAction {
    UpdateOptions(ChartOptionsPatch),
    UpdateSeries(Vec<ChartSeries>),
}

impl Reducible for ChartStore {
    type Action = ChartAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut model = self.model.clone();
        match action {
            ChartAction::UpdateOptions(patch) => model.update_options(patch),
            ChartAction::UpdateSeries(series) => model.update_series(series),
        }
        Rc::new(Self { model })
    }
}

/// Chart sink handed to the controller; every update becomes a store action
#[derive(Clone)]
pub struct StoreSink {
    dispatcher: UseReducerDispatcher<ChartStore>,
}

impl StoreSink {
    pub fn new(dispatcher: UseReducerDispatcher<ChartStore>) -> Self {
        Self { dispatcher }
    }
}

impl ChartSink for StoreSink {
    fn update_options(&mut self, patch: ChartOptionsPatch) {
        self.dispatcher.dispatch(ChartAction::UpdateOptions(patch));
    }

    fn update_series(&mut self, series: Vec<ChartSeries>) {
        self.dispatcher.dispatch(ChartAction::UpdateSeries(series));
    }
}

/// Create a chart store once, from its static configuration
#[hook]
pub fn use_chart_store(init: fn() -> ChartModel) -> UseReducerHandle<ChartStore> {
    use_reducer(move || ChartStore { model: init() })
}
