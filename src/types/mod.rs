pub mod itinerary;
pub mod request;

pub use itinerary::{
    CityItinerary, DraftBias, MultiCityPlanItem, PlanResponse, Stage, StageOutcome,
    SubRequirements, SummarySource, TransportLink, WeatherInfo,
};
pub use request::{CityStop, PlanMode, PlanRequest};
