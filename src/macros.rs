#[macro_export]
macro_rules! version {
    () => {
        env!("CARGO_PKG_VERSION")
    };

    ($prefix:expr) => {
        concat!($prefix, env!("CARGO_PKG_VERSION"))
    };
}

/// Allows an actor to receive a message wrapped by [`crate::telemetry::TraceMessageExt::trace`],
/// running the underlying handler within the sender's span.
#[macro_export]
macro_rules! trace_handler {
    ($actor:ty, $msg:ty, $res:ty) => {
        impl ::actix::Handler<$crate::telemetry::TraceMessage<$msg>> for $actor {
            type Result = $res;

            fn handle(
                &mut self,
                msg: $crate::telemetry::TraceMessage<$msg>,
                ctx: &mut <Self as ::actix::Actor>::Context,
            ) -> Self::Result {
                let $crate::telemetry::TraceMessage { message, span } = msg;
                let _guard = span.enter();
                <Self as ::actix::Handler<$msg>>::handle(self, message, ctx)
            }
        }
    };
}
