//! Domain events published on channel lifecycle and membership changes

mod domain_event;

pub use domain_event::{
    ChannelCreatedEvent, ChannelDeletedEvent, ChannelReactivatedEvent, ChannelUpdatedEvent,
    DomainEvent, UserAddedEvent, UserRemovedEvent,
};
