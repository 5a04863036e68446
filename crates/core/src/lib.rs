pub mod shared {
    pub mod clock;
    pub mod constants;
    pub mod face_rect;
    pub mod frame;
    pub mod model_resolver;
    pub mod point;
}

pub mod detection {
    pub mod domain {
        pub mod face_locator;
    }
    pub mod infrastructure;
}

pub mod landmarks {
    pub mod domain {
        pub mod emotion_features;
        pub mod landmark_set;
        pub mod landmark_synthesizer;
        pub mod region_map;
    }
}

pub mod emotion {
    pub mod domain {
        pub mod emotion_distribution;
        pub mod emotion_scorer;
    }
    pub mod infrastructure;
}

pub mod conversation {
    pub mod domain {
        pub mod emotion_prompt;
        pub mod response_generator;
    }
    pub mod infrastructure;
}

pub mod session {
    pub mod domain {
        pub mod conversation_history;
        pub mod emotion_history;
    }
}

pub mod overlay {
    pub mod domain {
        pub mod overlay_renderer;
    }
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod image_reader;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod analyze_frame_use_case;
    pub mod chat_use_case;
    pub mod pipeline_logger;
}
