//! A representative slice of the generated broker model layer.
//!
//! The real client ships ~250 generated model types; the core only ever
//! sees what this module shows it: field declarations per type and
//! `bind_types` calls per polymorphic family.

#![allow(dead_code)]

use std::sync::Arc;

use tradewire::{
    EnumDef, FieldCodec, FieldDescriptor, FieldGroup, Registry, RegistryBuilder, ScalarKind,
    TypeId, WireValue,
};

pub struct Broker {
    pub registry: Registry,
    pub order: TypeId,
    pub market_order: TypeId,
    pub limit_order: TypeId,
    pub transaction: TypeId,
    pub order_fill: TypeId,
    pub heartbeat: TypeId,
    pub client_extensions: TypeId,
    pub market_order_request: TypeId,
    pub limit_order_request: TypeId,
    pub create_order_request: TypeId,
    pub stream_config: TypeId,
}

pub fn scalar(kind: ScalarKind) -> FieldCodec {
    FieldCodec::Scalar(kind)
}

pub fn s(text: &str) -> WireValue {
    WireValue::Str(text.to_owned())
}

fn pinned(enum_def: &Arc<EnumDef>, tag: &str) -> FieldDescriptor {
    FieldDescriptor::new("type", scalar(ScalarKind::Enum(Arc::clone(enum_def))))
        .default_value(s(tag))
}

pub fn broker() -> Broker {
    let mut b = RegistryBuilder::new();

    let order_type = b.enum_def("OrderType", ["MARKET", "LIMIT", "STOP"]);
    let transaction_type =
        b.enum_def("TransactionType", ["ORDER_FILL", "ORDER_CANCEL", "HEARTBEAT"]);
    let time_in_force = b.enum_def("TimeInForce", ["GTC", "FOK", "IOC"]);

    let client_extensions = b.model(
        "ClientExtensions",
        &[FieldGroup::new("client_extensions")
            .field(FieldDescriptor::new("id", scalar(ScalarKind::Text)).optional())
            .field(FieldDescriptor::new("tag", scalar(ScalarKind::Text)).optional())
            .field(FieldDescriptor::new("comment", scalar(ScalarKind::Text)).optional())],
    );

    // Shared by every concrete order type; mirrors the mixin layering of
    // the generated layer as an explicit group.
    let order_base = |tag: &str| {
        FieldGroup::new("order_base")
            .field(pinned(&order_type, tag))
            .field(FieldDescriptor::new("id", scalar(ScalarKind::Int)))
            .field(
                FieldDescriptor::new("create_time", scalar(ScalarKind::Text))
                    .alias("createTime")
                    .optional(),
            )
            .field(FieldDescriptor::new("instrument", scalar(ScalarKind::Text)))
            .field(FieldDescriptor::new("units", scalar(ScalarKind::Decimal)))
            .field(
                FieldDescriptor::new("time_in_force", scalar(ScalarKind::Enum(Arc::clone(&time_in_force))))
                    .alias("timeInForce")
                    .default_value(s("GTC")),
            )
            .field(
                FieldDescriptor::new("client_extensions", FieldCodec::Model(client_extensions))
                    .alias("clientExtensions")
                    .optional(),
            )
            .field(
                FieldDescriptor::new("margin_rate", scalar(ScalarKind::Decimal))
                    .alias("marginRate")
                    .optional()
                    .deprecated(),
            )
    };

    let market_order = b.model(
        "MarketOrder",
        &[
            order_base("MARKET"),
            FieldGroup::new("market_order").field(
                FieldDescriptor::new("price_bound", scalar(ScalarKind::Decimal))
                    .alias("priceBound")
                    .optional(),
            ),
        ],
    );
    let limit_order = b.model(
        "LimitOrder",
        &[
            order_base("LIMIT"),
            FieldGroup::new("limit_order")
                .field(FieldDescriptor::new("price", scalar(ScalarKind::Decimal)))
                .field(
                    FieldDescriptor::new("gtd_time", scalar(ScalarKind::Text))
                        .alias("gtdTime")
                        .optional(),
                ),
        ],
    );
    let order = b.abstract_model("Order");
    // STOP stays in the enum but unbound: the server documents it ahead of
    // this client modeling it.
    b.bind_types(
        order,
        "type",
        &order_type,
        &[("MARKET", market_order), ("LIMIT", limit_order)],
    );

    let transaction_base = |tag: &str| {
        FieldGroup::new("transaction_base")
            .field(pinned(&transaction_type, tag))
            .field(FieldDescriptor::new("id", scalar(ScalarKind::Int)))
            .field(
                FieldDescriptor::new("account_id", scalar(ScalarKind::Text)).alias("accountID"),
            )
            .field(FieldDescriptor::new("time", scalar(ScalarKind::Text)).optional())
    };
    let order_fill = b.model(
        "OrderFillTransaction",
        &[
            transaction_base("ORDER_FILL"),
            FieldGroup::new("order_fill")
                .field(FieldDescriptor::new("order_id", scalar(ScalarKind::Int)).alias("orderID"))
                .field(FieldDescriptor::new("units", scalar(ScalarKind::Decimal)))
                .field(
                    FieldDescriptor::new(
                        "trade_ids",
                        FieldCodec::List(Box::new(scalar(ScalarKind::Int))),
                    )
                    .alias("tradeIDs")
                    .optional(),
                )
                .field(FieldDescriptor::new("pl", scalar(ScalarKind::Decimal)).optional()),
        ],
    );
    let heartbeat = b.model(
        "TransactionHeartbeat",
        &[FieldGroup::new("heartbeat")
            .field(pinned(&transaction_type, "HEARTBEAT"))
            .field(
                FieldDescriptor::new("last_transaction_id", scalar(ScalarKind::Int))
                    .alias("lastTransactionID")
                    .optional(),
            )
            .field(FieldDescriptor::new("time", scalar(ScalarKind::Text)).optional())],
    );
    let transaction = b.abstract_model("Transaction");
    b.bind_types(
        transaction,
        "type",
        &transaction_type,
        &[("ORDER_FILL", order_fill), ("HEARTBEAT", heartbeat)],
    );

    // Outbound request family: same discriminator mechanism, driving the
    // encode path.
    let market_order_request = b.model(
        "MarketOrderRequest",
        &[FieldGroup::new("market_order_request")
            .field(pinned(&order_type, "MARKET"))
            .field(FieldDescriptor::new("instrument", scalar(ScalarKind::Text)))
            .field(FieldDescriptor::new("units", scalar(ScalarKind::Decimal)))
            .field(
                FieldDescriptor::new("time_in_force", scalar(ScalarKind::Enum(Arc::clone(&time_in_force))))
                    .alias("timeInForce")
                    .default_value(s("FOK")),
            )],
    );
    let limit_order_request = b.model(
        "LimitOrderRequest",
        &[FieldGroup::new("limit_order_request")
            .field(pinned(&order_type, "LIMIT"))
            .field(FieldDescriptor::new("instrument", scalar(ScalarKind::Text)))
            .field(FieldDescriptor::new("units", scalar(ScalarKind::Decimal)))
            .field(FieldDescriptor::new("price", scalar(ScalarKind::Decimal)))],
    );
    let create_order_request = b.abstract_model("CreateOrderRequest");
    b.bind_types(
        create_order_request,
        "type",
        &order_type,
        &[
            ("MARKET", market_order_request),
            ("LIMIT", limit_order_request),
        ],
    );

    let stream_config = b.model(
        "StreamConfig",
        &[FieldGroup::new("stream_config")
            .field(FieldDescriptor::new("account_id", scalar(ScalarKind::Text)).alias("accountID"))
            .field(FieldDescriptor::new("api_token", scalar(ScalarKind::Secret)).alias("apiToken"))
            .field(
                FieldDescriptor::new("heartbeat_interval", scalar(ScalarKind::Decimal))
                    .alias("heartbeatInterval")
                    .default_value(s("5.0")),
            )],
    );

    Broker {
        registry: b.build(),
        order,
        market_order,
        limit_order,
        transaction,
        order_fill,
        heartbeat,
        client_extensions,
        market_order_request,
        limit_order_request,
        create_order_request,
        stream_config,
    }
}
