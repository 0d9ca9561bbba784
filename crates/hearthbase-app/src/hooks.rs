//! Application hook registry.
//!
//! One [`Hook`] per lifecycle point. Record hooks are shared by every
//! collection: handlers bound through a `*_for(collections)` view only run
//! for those collections, while handlers bound on the hook itself run for
//! all of them.

use std::fmt;

use hearthbase_core::events::{
    BootstrapEvent, CollectionEvent, ModelEvent, RecordEvent, ServeEvent, TerminateEvent,
};
use hearthbase_hook::{Hook, HookView, TagSet};

/// Defines [`AppHooks`] with plain accessors for every hook and
/// collection-scoped view accessors for tagged hooks.
macro_rules! define_app_hooks {
    (
        plain {
            $( $(#[$pmeta:meta])* $plain:ident : $pevent:ty ),* $(,)?
        }
        tagged {
            $( $(#[$tmeta:meta])* $tagged:ident / $scoped:ident : $tevent:ty ),* $(,)?
        }
    ) => {
        /// Every lifecycle hook of the application.
        pub struct AppHooks {
            $( $plain: Hook<$pevent>, )*
            $( $tagged: Hook<$tevent>, )*
        }

        impl AppHooks {
            /// Creates the registry with no handlers bound.
            pub fn new() -> Self {
                Self {
                    $( $plain: Hook::new(), )*
                    $( $tagged: Hook::new(), )*
                }
            }

            /// Removes every handler from every hook.
            pub fn reset_all(&self) {
                $( self.$plain.reset(); )*
                $( self.$tagged.reset(); )*
            }

            /// Total number of handlers across all hooks.
            pub fn handler_count(&self) -> usize {
                0 $( + self.$plain.len() )* $( + self.$tagged.len() )*
            }

            $(
                $(#[$pmeta])*
                pub fn $plain(&self) -> &Hook<$pevent> {
                    &self.$plain
                }
            )*

            $(
                $(#[$tmeta])*
                pub fn $tagged(&self) -> &Hook<$tevent> {
                    &self.$tagged
                }

                #[doc = concat!("[`AppHooks::", stringify!($tagged), "`] scoped to the given collections.")]
                pub fn $scoped(&self, collections: impl Into<TagSet>) -> HookView<'_, $tevent> {
                    self.$tagged.view(collections)
                }
            )*
        }
    };
}

define_app_hooks! {
    plain {
        /// Wraps application bootstrap. The base action prepares the data directory.
        on_bootstrap: BootstrapEvent,
        /// Wraps the serving window. The base action waits for shutdown.
        on_serve: ServeEvent,
        /// Wraps application termination.
        on_terminate: TerminateEvent,

        /// Validation of any model before it is created or updated.
        on_model_validate: ModelEvent,
        /// Wraps creation of any model.
        on_model_create: ModelEvent,
        /// Wraps the store insert of any model.
        on_model_create_execute: ModelEvent,
        /// Fired after a model was created.
        on_model_after_create_success: ModelEvent,
        /// Fired after a model create failed.
        on_model_after_create_error: ModelEvent,
        /// Wraps update of any model.
        on_model_update: ModelEvent,
        /// Wraps the store update of any model.
        on_model_update_execute: ModelEvent,
        /// Fired after a model was updated.
        on_model_after_update_success: ModelEvent,
        /// Fired after a model update failed.
        on_model_after_update_error: ModelEvent,
        /// Wraps deletion of any model.
        on_model_delete: ModelEvent,
        /// Wraps the store delete of any model.
        on_model_delete_execute: ModelEvent,
        /// Fired after a model was deleted.
        on_model_after_delete_success: ModelEvent,
        /// Fired after a model delete failed.
        on_model_after_delete_error: ModelEvent,

        /// Validation of a collection before it is created or updated.
        on_collection_validate: CollectionEvent,
        /// Wraps collection creation.
        on_collection_create: CollectionEvent,
        /// Wraps the persisting step of collection creation.
        on_collection_create_execute: CollectionEvent,
        /// Fired after a collection was created.
        on_collection_after_create_success: CollectionEvent,
        /// Fired after a collection create failed.
        on_collection_after_create_error: CollectionEvent,
        /// Wraps collection update.
        on_collection_update: CollectionEvent,
        /// Wraps the persisting step of collection update.
        on_collection_update_execute: CollectionEvent,
        /// Fired after a collection was updated.
        on_collection_after_update_success: CollectionEvent,
        /// Fired after a collection update failed.
        on_collection_after_update_error: CollectionEvent,
        /// Wraps collection deletion.
        on_collection_delete: CollectionEvent,
        /// Wraps the persisting step of collection deletion.
        on_collection_delete_execute: CollectionEvent,
        /// Fired after a collection was deleted.
        on_collection_after_delete_success: CollectionEvent,
        /// Fired after a collection delete failed.
        on_collection_after_delete_error: CollectionEvent,
    }
    tagged {
        /// Validation of a record before it is created or updated.
        on_record_validate / on_record_validate_for: RecordEvent,
        /// Wraps record creation.
        on_record_create / on_record_create_for: RecordEvent,
        /// Wraps the persisting step of record creation.
        on_record_create_execute / on_record_create_execute_for: RecordEvent,
        /// Fired after a record was created.
        on_record_after_create_success / on_record_after_create_success_for: RecordEvent,
        /// Fired after a record create failed.
        on_record_after_create_error / on_record_after_create_error_for: RecordEvent,
        /// Wraps record update.
        on_record_update / on_record_update_for: RecordEvent,
        /// Wraps the persisting step of record update.
        on_record_update_execute / on_record_update_execute_for: RecordEvent,
        /// Fired after a record was updated.
        on_record_after_update_success / on_record_after_update_success_for: RecordEvent,
        /// Fired after a record update failed.
        on_record_after_update_error / on_record_after_update_error_for: RecordEvent,
        /// Wraps record deletion.
        on_record_delete / on_record_delete_for: RecordEvent,
        /// Wraps the persisting step of record deletion.
        on_record_delete_execute / on_record_delete_execute_for: RecordEvent,
        /// Fired after a record was deleted.
        on_record_after_delete_success / on_record_after_delete_success_for: RecordEvent,
        /// Fired after a record delete failed.
        on_record_after_delete_error / on_record_after_delete_error_for: RecordEvent,
    }
}

impl Default for AppHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppHooks")
            .field("handler_count", &self.handler_count())
            .finish()
    }
}
